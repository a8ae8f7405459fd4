use dioxus::prelude::*;

const BANNER_CSS: Asset = asset!("/assets/smartbanner.css");
const APP_ICON: Asset = asset!("/assets/apple-touch-icon.png");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // The banner stylesheet; animation timing is read back from it at runtime
        document::Link { rel: "stylesheet", href: BANNER_CSS }
        // Note: app-id meta tags and title are set in web/index.html so they
        // exist before the banner reads them

        Router::<Route> {}
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
}

#[component]
fn Home() -> Element {
    rsx! {
        BannerSlot {}
        main {
            class: "demo-page",
            h1 { "Photo Mate" }
            p { "Open this page on an iPhone (iOS 5 or earlier, or Chrome for iOS) or an Android phone to see the app banner." }
            p {
                "Close it and it stays away for 15 days; follow the store link and it stays away for 30."
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[component]
fn BannerSlot() -> Element {
    use smartbanner::components::SmartBannerMount;
    use smartbanner::BannerConfig;

    let config = BannerConfig {
        author: Some("Acme Labs".to_string()),
        icon: Some(APP_ICON.to_string()),
        price: "FREE".to_string(),
        ..Default::default()
    };

    rsx! {
        SmartBannerMount { config: config }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[component]
fn BannerSlot() -> Element {
    // The banner needs a browser document
    rsx! {}
}
