//! Background template catalog.
//!
//! The catalog is a fixed static array. Templates are only ever selected,
//! never created or removed at runtime.

use std::fmt;

/// A named, pre-defined background image choice.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CardTemplate {
    /// Stable identifier (used on the command line)
    pub id: &'static str,
    /// Display name shown under the picker
    pub name: &'static str,
    /// Image path relative to the assets directory
    pub image: &'static str,
}

/// All selectable templates, in picker order.
pub static TEMPLATES: [CardTemplate; 5] = [
    CardTemplate {
        id: "snowman",
        name: "Kitty",
        image: "1-test.jpg",
    },
    CardTemplate {
        id: "postbox",
        name: "Postbox",
        image: "2-test.jpg",
    },
    CardTemplate {
        id: "rudolph",
        name: "Rudolph",
        image: "3-test.PNG",
    },
    CardTemplate {
        id: "gift",
        name: "Gift",
        image: "4-gift.jpeg",
    },
    CardTemplate {
        id: "tree",
        name: "Tree",
        image: "5-tree.jpeg",
    },
];

impl CardTemplate {
    /// The template a fresh card starts with.
    #[must_use]
    pub fn default_template() -> &'static Self {
        &TEMPLATES[0]
    }

    /// Looks up a template by its identifier (case-insensitive).
    #[must_use]
    pub fn find(id: &str) -> Option<&'static Self> {
        TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
    }

    /// Position of this template in the catalog.
    #[must_use]
    pub fn index(&self) -> usize {
        TEMPLATES
            .iter()
            .position(|t| t.id == self.id)
            .unwrap_or_default()
    }

    /// Template at a catalog index, wrapping around in both directions.
    #[must_use]
    pub fn at_wrapping(index: isize) -> &'static Self {
        let len = TEMPLATES.len() as isize;
        &TEMPLATES[index.rem_euclid(len) as usize]
    }
}

impl fmt::Display for CardTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Parses a template id for clap.
pub fn parse_template_id(s: &str) -> Result<&'static CardTemplate, String> {
    CardTemplate::find(s).ok_or_else(|| {
        let ids: Vec<&str> = TEMPLATES.iter().map(|t| t.id).collect();
        format!("unknown template '{s}' (expected one of: {})", ids.join(", "))
    })
}
