//! Accessibility attributes and reference checks.
//!
//! The terminal renderer ignores these, but they describe the tree the same
//! way a screen reader would see it and are checked by tests.

use std::collections::HashSet;

use crate::element::{find_element, text_content, Content, Element};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Dialog,
    Button,
    Heading,
    Img,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aria {
    /// The element is a modal region (content behind it is inert).
    pub modal: bool,
    /// Id of the element that labels this one.
    pub labelled_by: Option<String>,
    /// Inline label, used when there is no visible label element.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum A11yError {
    #[error("element '{element}' is labelled by '{target}', which is not in the tree")]
    DanglingLabel { element: String, target: String },
}

/// Verify that every `labelled_by` reference resolves to an element in the tree.
pub fn check_references(root: &Element) -> Result<(), A11yError> {
    let mut ids = HashSet::new();
    collect_ids(root, &mut ids);
    check_element(root, &ids)
}

fn collect_ids<'a>(element: &'a Element, ids: &mut HashSet<&'a str>) {
    ids.insert(element.id.as_str());
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_ids(child, ids);
        }
    }
}

fn check_element(element: &Element, ids: &HashSet<&str>) -> Result<(), A11yError> {
    if let Some(target) = &element.aria.labelled_by {
        if !ids.contains(target.as_str()) {
            return Err(A11yError::DanglingLabel {
                element: element.id.clone(),
                target: target.clone(),
            });
        }
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            check_element(child, ids)?;
        }
    }
    Ok(())
}

/// All elements with the given role, in tree order.
pub fn find_by_role(root: &Element, role: Role) -> Vec<&Element> {
    let mut found = Vec::new();
    collect_role(root, role, &mut found);
    found
}

fn collect_role<'a>(element: &'a Element, role: Role, found: &mut Vec<&'a Element>) {
    if element.role == Some(role) {
        found.push(element);
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_role(child, role, found);
        }
    }
}

/// Resolve the accessible name of `element`: the text of its `labelled_by`
/// target if present, otherwise its inline label.
pub fn accessible_name(root: &Element, element: &Element) -> Option<String> {
    if let Some(target) = &element.aria.labelled_by {
        return find_element(root, target).map(text_content);
    }
    element.aria.label.clone()
}
