//! Chat transcript markup: one container per message, and a standalone page.

use crate::core::message::{Message, Role};

use super::escape::escape_html;

const STYLES: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    max-width: 860px;
    margin: 20px auto;
    color: #24292e;
}
.message {
    display: flex;
    gap: 10px;
    margin: 12px 0;
}
.message.user {
    justify-content: flex-end;
}
.message-content {
    padding: 10px 14px;
    border-radius: 10px;
    background: #f1f3f4;
    line-height: 1.5;
}
.message.user .message-content {
    background: #667eea;
    color: white;
}
.message-content code {
    background: #f1f3f4;
    padding: 2px 6px;
    border-radius: 4px;
    font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', monospace;
    font-size: 0.9em;
    color: #d63384;
}
.code-block {
    margin: 10px 0;
    background: #f8f9fa;
    border: 1px solid #e9ecef;
    border-radius: 8px;
    overflow: hidden;
}
.code-block pre {
    margin: 0;
    padding: 15px;
    overflow-x: auto;
}
.code-block code {
    background: none;
    padding: 0;
    color: #24292e;
    font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', monospace;
    font-size: 0.9em;
    line-height: 1.4;
}
.message-content ul,
.message-content ol {
    margin: 10px 0;
    padding-left: 20px;
}
.message-content li {
    margin: 5px 0;
    line-height: 1.4;
}
.message-content strong {
    font-weight: 600;
    color: #2c3e50;
}
.message-content em {
    font-style: italic;
    color: #555;
}
"#;

fn icon(role: Role) -> String {
    let class = match role {
        Role::User => "fas fa-user",
        Role::Assistant => "fas fa-robot",
    };
    format!(
        r#"<div class="message-icon {}"><i class="{}"></i></div>"#,
        role.as_str(),
        class
    )
}

/// Render one transcript entry. Assistant icons lead, user icons trail.
pub(crate) fn render_message(message: &Message) -> String {
    let content = format!(
        r#"<div class="message-content">{}</div>"#,
        super::format(&message.content)
    );
    let (first, second) = match message.role {
        Role::Assistant => (icon(message.role), content),
        Role::User => (content, icon(message.role)),
    };
    format!(
        r#"<div class="message {}">{}{}</div>"#,
        message.role.as_str(),
        first,
        second
    )
}

/// Render a complete HTML page for a transcript.
pub(crate) fn render_document(title: &str, messages: &[Message]) -> String {
    let title = escape_html(title);
    let mut body = String::new();
    for message in messages {
        body.push_str("    ");
        body.push_str(&render_message(message));
        body.push('\n');
    }
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>{title}</title>\n<style>{STYLES}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n<div class=\"chat-messages\">\n{body}</div>\n</body>\n</html>\n"
    )
}
