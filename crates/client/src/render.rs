use std::path::{Path, PathBuf};

use maud::{html, Markup, DOCTYPE};

use wishwall_core::domain::wall::{WallEntry, WallView};

/// Where a rendered wall ends up.
pub trait Surface: Send + Sync {
    fn paint(&self, html: &str) -> std::io::Result<()>;
}

/// Writes each frame to an HTML file, replacing the previous one.
#[derive(Debug, Clone)]
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Surface for FileSurface {
    fn paint(&self, html: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("html.tmp");
        std::fs::write(&tmp, html)?;
        std::fs::rename(&tmp, &self.path)
    }
}

pub fn wall_page(view: &WallView) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Wish Wall" }
            }
            body {
                (top_wishes(view))
                (comment_list(view))
            }
        }
    }
}

pub fn top_wishes(view: &WallView) -> Markup {
    html! {
        section .top-wishes {
            ol {
                @for (rank, text) in view.highlights.iter().enumerate() {
                    li id=(format!("top{}", rank + 1)) { (text) }
                }
            }
        }
    }
}

pub fn comment_list(view: &WallView) -> Markup {
    html! {
        ul #comments-list {
            @for entry in &view.entries {
                (comment_item(entry))
            }
        }
    }
}

fn comment_item(entry: &WallEntry) -> Markup {
    let comment = &entry.comment;
    let (icon, label, pressed) = if entry.liked {
        ("❤️", "Liked", "true")
    } else {
        ("🤍", "Like", "false")
    };
    html! {
        li .comment data-id=(comment.id) {
            div .meta {
                div {
                    div .name { (comment.name) }
                    div .time aria-hidden="true" { (entry.age) }
                }
                div .score { strong { (comment.likes) } }
            }
            div .text { (comment.text) }
            div .like-row {
                button .like-btn .liked[entry.liked]
                    aria-pressed=(pressed)
                    data-id=(comment.id) {
                    span .icon { (icon) }
                    span .label { (label) }
                }
                div .time-small aria-hidden="true" { (entry.age) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishwall_core::domain::comments::Comment;
    use wishwall_core::domain::liked::LikedSet;
    use wishwall_core::domain::wall::build_view;

    fn comment(id: &str, text: &str, likes: i64) -> Comment {
        Comment {
            id: id.to_string(),
            name: "Anonymous".to_string(),
            text: text.to_string(),
            likes,
            timestamp: 0,
        }
    }

    #[test]
    fn user_text_is_escaped() {
        let view = build_view(
            &[comment("a", "<script>alert(1)</script>", 0)],
            &LikedSet::default(),
            0,
        );
        let html = wall_page(&view).into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn liked_entries_are_marked() {
        let liked: LikedSet = ["b"].into_iter().collect();
        let view = build_view(&[comment("a", "one", 2), comment("b", "two", 1)], &liked, 0);
        let html = comment_list(&view).into_string();
        assert_eq!(html.matches(r#"class="like-btn liked""#).count(), 1);
        assert_eq!(html.matches(r#"aria-pressed="true""#).count(), 1);
        assert!(html.contains(r#"aria-pressed="false""#));
    }

    #[test]
    fn top_wishes_render_three_slots() {
        let view = build_view(&[comment("a", "only", 0)], &LikedSet::default(), 0);
        let html = top_wishes(&view).into_string();
        assert!(html.contains(r#"<li id="top1">only</li>"#));
        assert!(html.contains(r#"<li id="top3"></li>"#));
    }

    #[test]
    fn file_surface_replaces_frame() {
        let dir = tempfile::tempdir().unwrap();
        let surface = FileSurface::new(dir.path().join("out/wall.html"));
        surface.paint("first").unwrap();
        surface.paint("second").unwrap();
        assert_eq!(std::fs::read_to_string(surface.path()).unwrap(), "second");
    }
}
