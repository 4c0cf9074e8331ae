//! url-state mocks - web page exercising URL-synced controls

fn main() {
    dioxus::launch(url_state_mocks::App);
}
