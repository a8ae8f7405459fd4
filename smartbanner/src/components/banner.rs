//! Presentation Builder: banner and placeholder element trees

use super::markup::{css_url, ElementNode};
use crate::services::config::BannerConfig;
use crate::services::metadata::ResolvedBanner;

/// `id` of the banner root, the stylesheet's hook
pub const BANNER_ID: &str = "smartbanner";
pub const CLOSE_CLASS: &str = "sb__close";
pub const LINK_CLASS: &str = "sb__wrap";
pub const PLACEHOLDER_CLASS: &str = "sb-placeholder";

/// Banner root:
///
/// ```text
/// div#smartbanner.sb.sb_<platform>
///   i.sb__close
///   a.sb__wrap[href]
///     b.sb__btn
///     i.sb__ico[style=background-image]
///     span.sb__info > b(title) span(author) span(price — store)
/// ```
pub fn build_banner(resolved: &ResolvedBanner, config: &BannerConfig) -> ElementNode {
    let info = ElementNode::new("span")
        .class("sb__info")
        .child(ElementNode::new("b").text(resolved.title.as_str()))
        .child(ElementNode::new("span").text(resolved.author.as_str()))
        .child(ElementNode::new("span").text(price_line(&config.price, &resolved.store_label)));

    let link = ElementNode::new("a")
        .class(LINK_CLASS)
        .attr("href", resolved.store_url.as_str())
        .child(ElementNode::new("b").class("sb__btn").text(config.button.as_str()))
        .child(
            ElementNode::new("i")
                .class("sb__ico")
                .attr("style", format!("background-image:{}", css_url(&resolved.icon))),
        )
        .child(info);

    ElementNode::new("div")
        .attr("id", BANNER_ID)
        .class(format!("sb sb_{}", resolved.platform.id()))
        .child(ElementNode::new("i").class(CLOSE_CLASS))
        .child(link)
}

/// Zero-height spacer that grows with the banner so page content does not jump
pub fn build_placeholder() -> ElementNode {
    ElementNode::new("div")
        .class(PLACEHOLDER_CLASS)
        .attr("style", "height:0")
}

/// `"FREE — On the App Store"`, or just the store label when there is no price
fn price_line(price: &str, store_label: &str) -> String {
    if price.is_empty() {
        store_label.to_string()
    } else {
        format!("{price} \u{2014} {store_label}")
    }
}
