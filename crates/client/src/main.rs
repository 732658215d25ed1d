//! EventNow Client - Main entry point
//!
//! Runs in the browser (WASM) by default; the `desktop` feature builds a
//! native window around the same components.

#![allow(non_snake_case)]

use dioxus::prelude::*;
use eventnow_client::{AuthProvider, NotificationProvider, Route};

// Assets
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // Initialize tracing for desktop
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("eventnow_client=debug,eventnow_core=debug")),
            )
            .init();
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "EventNow" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Script { src: "https://cdn.tailwindcss.com" }

        NotificationProvider {
            AuthProvider {
                Router::<Route> {}
            }
        }
    }
}
