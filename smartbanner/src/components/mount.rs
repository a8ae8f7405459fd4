use crate::app::exports;
use crate::app::Launch;
use crate::services::config::BannerConfig;
use crate::{console_error, console_info};
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct SmartBannerMountProps {
    pub config: BannerConfig,
}

/// Creates the smart app banner after the component mounts and destroys it
/// on unmount. Renders nothing itself; the banner goes to the top of `<body>`.
#[component]
pub fn SmartBannerMount(props: SmartBannerMountProps) -> Element {
    let config = props.config.clone();

    use_effect(move || match exports::mount(config.clone()) {
        Ok(Launch::Created(banner)) => {
            console_info!("[SmartBannerMount] Banner created for {}", banner.resolved().app_id);
        }
        Ok(_) => {}
        Err(e) => console_error!("[SmartBannerMount] Failed to create banner: {}", e),
    });

    use_drop(exports::unmount);

    rsx! {}
}
