//! Verification email content

pub const VERIFICATION_SUBJECT: &str = "Verify your cafe owner account";

/// Rendered email body in both formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Render the sign-up code email for `owner_name`
pub fn render_verification_email(owner_name: &str, code: &str, ttl_minutes: i64) -> VerificationEmail {
    let name = if owner_name.trim().is_empty() {
        "there"
    } else {
        owner_name.trim()
    };

    let text = format!(
        "Hi {name},\n\n\
         Your verification code is {code}.\n\n\
         It expires in {ttl_minutes} minutes. If you did not sign up, you can ignore this email.\n"
    );

    let html = format!(
        "<p>Hi {name},</p>\
         <p>Your verification code is <strong style=\"font-size:20px;letter-spacing:4px\">{code}</strong>.</p>\
         <p>It expires in {ttl_minutes} minutes. If you did not sign up, you can ignore this email.</p>",
        name = escape_html(name),
    );

    VerificationEmail {
        subject: VERIFICATION_SUBJECT.to_string(),
        text,
        html,
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
