//! Declarative page content.
//!
//! The content model is plain data: ordered lists of tags, skills and cards
//! plus a handful of free-text sections. List order is display order. The
//! composer may show only a prefix of a list, but never mutates it.
//!
//! A stock model is compiled in. A `content.toml` in the content root is
//! merged on top of it at build time, so a site can swap any group:
//!
//! ```toml
//! [[skills]]
//! name = "Rust"
//! icon = "/icons/rust.svg"
//!
//! [[skills]]
//! name = "SQL"          # no icon: the tile shows a monogram
//!
//! [highlight]
//! headline = "Born of curiosity"
//! ```
//!
//! Arrays replace the stock list wholesale; tables merge key-by-key.

use crate::config::{self, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content file error: {0}")]
    Load(#[from] ConfigError),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Content validation error: {0}")]
    Validation(String),
}

/// A chip shown around the avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tag {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One entry of the skill grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    pub name: String,
    /// Icon URL. Absent icons render as a monogram of `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// The card next to the introduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightCard {
    pub eyebrow: String,
    /// Headline text before the accented word.
    pub headline: String,
    /// Accented word, rendered in the theme accent color.
    pub accent: String,
    /// Headline text after the accented word.
    pub tail: String,
    pub labels: Vec<String>,
}

impl Default for HighlightCard {
    fn default() -> Self {
        Self {
            eyebrow: "Pursuit".to_string(),
            headline: "Born of".to_string(),
            accent: "passion".to_string(),
            tail: "and made to create".to_string(),
            labels: vec![
                "Product design".to_string(),
                "Programming".to_string(),
                "Experience".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InfoCard {
    pub title: String,
    pub body: String,
}

/// A long-form block; `body` is markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextSection {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentModel {
    pub tags: Vec<Tag>,
    pub skills: Vec<Skill>,
    pub highlight: HighlightCard,
    pub cards: Vec<InfoCard>,
    pub sections: Vec<TextSection>,
}

fn tag(icon: &str, text: &str) -> Tag {
    Tag {
        text: text.to_string(),
        icon: Some(icon.to_string()),
    }
}

fn skill(name: &str, icon: &str) -> Skill {
    Skill {
        name: name.to_string(),
        icon: Some(icon.to_string()),
    }
}

impl Default for ContentModel {
    fn default() -> Self {
        Self {
            tags: vec![
                tag("🤖️", "Gadget enthusiast"),
                tag("🔍", "Happy to help"),
                tag("🏠", "Smart-home tinkerer"),
                tag("🔨", "Design to deploy"),
                tag("🤝", "Interaction design"),
                tag("🏃", "Gets things done"),
                tag("🧱", "Team engine"),
                tag("💢", "Few words, much work"),
            ],
            skills: vec![
                skill("React", "/icons/react.svg"),
                skill("Next.js", "/icons/nextjs.svg"),
                skill("Tailwind", "/icons/tailwind.svg"),
                skill("JavaScript", "/icons/js.svg"),
                skill("TypeScript", "/icons/ts.svg"),
                skill("HTML", "/icons/html.svg"),
                skill("CSS", "/icons/css.svg"),
                skill("Node.js", "/icons/nodejs.svg"),
            ],
            highlight: HighlightCard::default(),
            cards: vec![
                InfoCard {
                    title: "Career".to_string(),
                    body: "A few words about my career so far...".to_string(),
                },
                InfoCard {
                    title: "Personality".to_string(),
                    body: "A few words about my personality...".to_string(),
                },
            ],
            sections: vec![
                TextSection {
                    heading: "Why this site".to_string(),
                    body: "Why I started writing here, and what I hope this blog becomes."
                        .to_string(),
                },
                TextSection {
                    heading: "Thanks".to_string(),
                    body: "Thanks for visiting! Supporters and credits go here.".to_string(),
                },
            ],
        }
    }
}

impl ContentModel {
    /// Reject entries with blank display text.
    pub fn validate(&self) -> Result<(), ContentError> {
        if let Some(pos) = self.tags.iter().position(|t| t.text.trim().is_empty()) {
            return Err(ContentError::Validation(format!("tags[{pos}].text is empty")));
        }
        if let Some(pos) = self.skills.iter().position(|s| s.name.trim().is_empty()) {
            return Err(ContentError::Validation(format!("skills[{pos}].name is empty")));
        }
        if let Some(pos) = self.cards.iter().position(|c| c.title.trim().is_empty()) {
            return Err(ContentError::Validation(format!("cards[{pos}].title is empty")));
        }
        if let Some(pos) = self.sections.iter().position(|s| s.heading.trim().is_empty()) {
            return Err(ContentError::Validation(format!(
                "sections[{pos}].heading is empty"
            )));
        }
        Ok(())
    }
}

/// Load the content model: stock content with `content.toml` merged on top.
pub fn load_content(root: &Path) -> Result<ContentModel, ContentError> {
    let stock = toml::Value::try_from(ContentModel::default())
        .expect("stock content must serialize");
    let merged = match config::load_raw_toml(root, "content.toml")? {
        Some(overlay) => config::merge_toml(stock, overlay),
        None => stock,
    };
    let content: ContentModel = merged.try_into()?;
    content.validate()?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn stock_content_shape() {
        let content = ContentModel::default();
        assert_eq!(content.tags.len(), 8);
        assert_eq!(content.skills.len(), 8);
        assert_eq!(content.skills[0].name, "React");
        assert_eq!(content.skills[7].name, "Node.js");
        assert_eq!(content.cards.len(), 2);
        assert_eq!(content.sections.len(), 2);
        assert!(content.validate().is_ok());
    }

    #[test]
    fn load_content_without_file_is_stock() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_content(tmp.path()).unwrap(), ContentModel::default());
    }

    #[test]
    fn content_file_replaces_lists_and_keeps_the_rest() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("content.toml"),
            r#"
[[skills]]
name = "Rust"
icon = "/icons/rust.svg"

[[skills]]
name = "SQL"

[highlight]
accent = "curiosity"
"#,
        )
        .unwrap();

        let content = load_content(tmp.path()).unwrap();
        let names: Vec<&str> = content.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Rust", "SQL"]);
        assert_eq!(content.skills[1].icon, None);
        assert_eq!(content.highlight.accent, "curiosity");
        assert_eq!(content.highlight.eyebrow, "Pursuit");
        assert_eq!(content.tags.len(), 8);
    }

    #[test]
    fn empty_lists_are_allowed() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("content.toml"), "skills = []\ntags = []").unwrap();
        let content = load_content(tmp.path()).unwrap();
        assert!(content.skills.is_empty());
        assert!(content.tags.is_empty());
    }

    #[test]
    fn unknown_content_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("content.toml"),
            "[[skills]]\nname = \"Rust\"\nlevel = 3",
        )
        .unwrap();
        assert!(matches!(
            load_content(tmp.path()),
            Err(ContentError::Toml(_))
        ));
    }

    #[test]
    fn blank_skill_name_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("content.toml"), "[[skills]]\nname = \"  \"").unwrap();
        let err = load_content(tmp.path()).unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));
        assert!(err.to_string().contains("skills[0]"));
    }
}
