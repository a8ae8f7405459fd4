//! Typed element tree for the banner markup.
//!
//! Text and attribute values are kept as data, never spliced into HTML
//! source: `materialize` assigns them through `setAttribute` and text nodes.
//! Page metadata (titles, author names, icon URLs) therefore cannot inject
//! markup into the host page.

/// One element with its attributes, optional leading text and children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementNode {
    pub tag: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub text: Option<String>,
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Depth-first search for the first element carrying `class`
    pub fn find_by_class(&self, class: &str) -> Option<&ElementNode> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_class(class))
    }

    /// Concatenated text of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// Build the live DOM element
    #[cfg(target_arch = "wasm32")]
    pub fn materialize(&self, document: &web_sys::Document) -> Result<web_sys::Element, wasm_bindgen::JsValue> {
        let element = document.create_element(self.tag)?;
        for (name, value) in &self.attributes {
            element.set_attribute(name, value)?;
        }
        if let Some(text) = &self.text {
            element.append_child(&document.create_text_node(text))?;
        }
        for child in &self.children {
            element.append_child(&child.materialize(document)?)?;
        }
        Ok(element)
    }
}

/// CSS `url("...")` with the string escaped so it cannot close the declaration
pub fn css_url(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 7);
    out.push_str("url(\"");
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' | '\r' | '\u{c}' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out.push_str("\")");
    out
}
