use std::fmt::Write;

use super::view::{CardKind, NextAction, ReconciliationView, ResultCard};

/// Minimal escaping for text and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// 查重结果模态框的 HTML
pub fn render_html(view: &ReconciliationView) -> String {
    let mut html = String::new();

    html.push_str(r#"<div id="resultsList">"#);
    for card in &view.cards {
        render_card(&mut html, card);
    }
    html.push_str("</div>");

    let _ = write!(html, r#"<div id="checkSummary">{}</div>"#, escape(&view.summary()));

    html.push_str(r#"<div id="actionArea">"#);
    render_action(&mut html, &view.next_action);
    html.push_str("</div>");

    html
}

fn render_card(html: &mut String, card: &ResultCard) {
    let video_badge = if card.is_video {
        r#"<span class="badge bg-dark">视频</span>"#
    } else {
        ""
    };

    match &card.kind {
        CardKind::Duplicate { existing_group_title, detail_url } => {
            let _ = write!(
                html,
                r#"<div class="check-item duplicate"><img src="{}" class="check-thumb">{}<strong class="text-danger">{}</strong><div class="text-truncate">{}</div><div>位于: <strong>{}</strong>"#,
                escape(&card.thumbnail_url),
                video_badge,
                card.headline(),
                escape(&card.filename),
                escape(existing_group_title),
            );
            if let Some(url) = detail_url {
                let _ = write!(html, r#"<a href="{}" target="_blank">查看旧卡片</a>"#, escape(url));
            }
            html.push_str("</div></div>");
        }
        CardKind::Clean => {
            let _ = write!(
                html,
                r#"<div class="check-item clean"><img src="{}" class="check-thumb">{}<div class="text-success">{}</div><div class="text-truncate">{}</div></div>"#,
                escape(&card.thumbnail_url),
                video_badge,
                card.headline(),
                escape(&card.filename),
            );
        }
    }
}

fn render_action(html: &mut String, action: &NextAction) {
    match action {
        NextAction::PublishAnyway { publish_url } => {
            html.push_str(r#"<div class="alert alert-warning">发现重复图片！建议剔除重复项后再发布。</div>"#);
            let _ = write!(
                html,
                r#"<button class="btn btn-secondary" data-bs-dismiss="modal">关闭</button><a href="{}" class="btn btn-primary">{}</a>"#,
                escape(publish_url),
                action.publish_label(),
            );
        }
        NextAction::Publish { publish_url } => {
            html.push_str(r#"<div class="text-success">完美！没有发现重复图片。</div>"#);
            let _ = write!(
                html,
                r#"<a href="{}" class="btn btn-lg btn-primary">{}</a>"#,
                escape(publish_url),
                action.publish_label(),
            );
        }
    }
}
