//! Page composition.
//!
//! Turns one cycle's inputs into a [`RenderOutput`]: a typed page tree
//! ([`AboutPage`]), its HTML rendering and the revalidation decision.
//!
//! ## Regions
//!
//! ```text
//! hero          avatar + first `hero.tag_limit` tags, heading
//! introduction  greeting, author, bio (or BIO_PLACEHOLDER)
//! highlight     fixed card from the content model
//! skills        one tile per skill, then a "More" tile
//! cards         info cards
//! sections      markdown prose blocks
//! ```
//!
//! Each region is built by its own function with a total fallback, so a
//! missing value in one region only ever degrades that region. Composition
//! is deterministic: the same inputs produce byte-identical HTML.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated text is escaped; only markdown output is inserted raw.

use crate::config::{self, SiteConfig};
use crate::content::{ContentModel, HighlightCard, InfoCard, Skill, Tag, TextSection};
use crate::resolve::{self, ScopeContext};
use crate::revalidate::{self, IntervalDecision};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

/// Shown when no biography resolves.
pub const BIO_PLACEHOLDER: &str = "This person is lazy and left nothing behind...";

const GREETING: &str = "Hello, nice to meet you 👋";
const HERO_HEADING: &str = "About this site";
const SKILLS_HEADING: &str = "Skills";
const SKILLS_SUBHEADING: &str = "Unleash creativity";
const MORE_LABEL: &str = "More";

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Output of one build cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub page: AboutPage,
    pub html: String,
    pub interval: IntervalDecision,
}

/// Composed page tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AboutPage {
    pub title: String,
    pub lang: String,
    pub hero: Hero,
    pub intro: Introduction,
    pub highlight: HighlightCard,
    pub skills: Vec<SkillTile>,
    pub cards: Vec<InfoCard>,
    pub sections: Vec<TextSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub avatar: String,
    /// Displayed prefix of the tag list.
    pub tags: Vec<Tag>,
    /// Length of the full tag list.
    pub total_tags: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Introduction {
    pub author: String,
    pub bio: String,
    pub bio_is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkillTile {
    Skill(Skill),
    /// Trailing sentinel, always present.
    More,
}

impl SkillTile {
    pub fn label(&self) -> &str {
        match self {
            SkillTile::Skill(skill) => &skill.name,
            SkillTile::More => MORE_LABEL,
        }
    }
}

/// First character of a skill name, used when it has no icon.
pub fn monogram(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}

/// Compose the About page for this scope.
pub fn compose(scope: &ScopeContext<'_>, content: &ContentModel) -> RenderOutput {
    let site = scope.site;
    let page = AboutPage {
        title: site.site.title.clone(),
        lang: site.site.lang.clone(),
        hero: hero_region(&site.site.avatar, &content.tags, site.hero.tag_limit),
        intro: intro_region(scope),
        highlight: content.highlight.clone(),
        skills: skill_region(&content.skills),
        cards: content.cards.clone(),
        sections: content.sections.clone(),
    };
    let html = render_page(&page, site).into_string();
    RenderOutput {
        page,
        html,
        interval: revalidate::compute_interval(scope),
    }
}

fn hero_region(avatar: &str, tags: &[Tag], limit: usize) -> Hero {
    Hero {
        avatar: avatar.to_string(),
        tags: tags.iter().take(limit).cloned().collect(),
        total_tags: tags.len(),
    }
}

fn intro_region(scope: &ScopeContext<'_>) -> Introduction {
    let author = resolve::resolve(resolve::AUTHOR, scope)
        .as_deref()
        .unwrap_or(resolve::DEFAULT_AUTHOR)
        .to_string();
    match resolve::resolve(resolve::BIO, scope).as_deref() {
        Some(bio) => Introduction {
            author,
            bio: bio.to_string(),
            bio_is_placeholder: false,
        },
        None => Introduction {
            author,
            bio: BIO_PLACEHOLDER.to_string(),
            bio_is_placeholder: true,
        },
    }
}

fn skill_region(skills: &[Skill]) -> Vec<SkillTile> {
    skills
        .iter()
        .cloned()
        .map(SkillTile::Skill)
        .chain(std::iter::once(SkillTile::More))
        .collect()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, lang: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

fn render_hero(hero: &Hero) -> Markup {
    html! {
        section.hero {
            div.hero-stage {
                img.avatar src=(hero.avatar) alt="Author avatar" width="150" height="150";
                div.tag-cloud {
                    @for tag in &hero.tags {
                        span.tag {
                            @if let Some(icon) = &tag.icon {
                                span.tag-icon { (icon) }
                            }
                            (tag.text)
                        }
                    }
                }
            }
            h2 { (HERO_HEADING) }
            p.subtitle { (GREETING) }
        }
    }
}

fn render_intro(intro: &Introduction, highlight: &HighlightCard) -> Markup {
    html! {
        section.intro-grid {
            div.intro-card {
                p.greeting { (GREETING) }
                h2 { "I'm " (intro.author) }
                p.bio.placeholder[intro.bio_is_placeholder] { (intro.bio) }
            }
            div.highlight-card {
                p.eyebrow { (highlight.eyebrow) }
                h3 {
                    (highlight.headline) " "
                    span.accent { (highlight.accent) }
                    br;
                    (highlight.tail)
                }
                div.highlight-labels {
                    @for label in &highlight.labels {
                        span { (label) }
                    }
                }
            }
        }
    }
}

fn render_skill_tile(tile: &SkillTile) -> Markup {
    match tile {
        SkillTile::Skill(skill) => html! {
            div.skill-tile {
                div.tile-icon {
                    @if let Some(icon) = &skill.icon {
                        img src=(icon) alt=(skill.name) loading="lazy";
                    } @else {
                        span.monogram { (monogram(&skill.name)) }
                    }
                }
                p.tile-label { (skill.name) }
            }
        },
        SkillTile::More => html! {
            div.skill-tile.skill-more {
                div.tile-icon { "..." }
                p.tile-label { (MORE_LABEL) }
            }
        },
    }
}

fn render_skills(tiles: &[SkillTile]) -> Markup {
    html! {
        section.skills {
            h2 { (SKILLS_HEADING) }
            p.subtitle { (SKILLS_SUBHEADING) }
            div.skill-grid {
                @for tile in tiles {
                    (render_skill_tile(tile))
                }
            }
        }
    }
}

fn render_cards(cards: &[InfoCard]) -> Markup {
    html! {
        @if !cards.is_empty() {
            section.info-grid {
                @for card in cards {
                    div.info-card {
                        h3 { (card.title) }
                        p { (card.body) }
                    }
                }
            }
        }
    }
}

fn render_sections(sections: &[TextSection]) -> Markup {
    html! {
        @if !sections.is_empty() {
            section.prose {
                @for section in sections {
                    h2 { (section.heading) }
                    (markdown(&section.body))
                }
            }
        }
    }
}

fn markdown(body: &str) -> Markup {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(body));
    PreEscaped(out)
}

/// Render the composed page as a full HTML document.
pub fn render_page(page: &AboutPage, site: &SiteConfig) -> Markup {
    let css = format!(
        "{}\n\n{}",
        config::generate_theme_css(&site.theme),
        CSS_STATIC
    );
    let content = html! {
        main.about-page {
            (render_hero(&page.hero))
            (render_intro(&page.intro, &page.highlight))
            (render_skills(&page.skills))
            (render_cards(&page.cards))
            (render_sections(&page.sections))
        }
    };
    base_document(&page.title, &page.lang, &css, content)
}

// ============================================================================
// Tests
// ============================================================================
