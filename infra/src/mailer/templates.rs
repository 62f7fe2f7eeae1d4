//! HTML bodies for verification and activation mail
//!
//! Templates are rendered with handlebars on each send. The activation
//! template is shared by every action kind; the per-action wording,
//! button text and button color are chosen here before rendering.

use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use mg_core::domain::entities::activation_token::TOKEN_EXPIRY_MINUTES;
use mg_core::domain::value_objects::ActionKind;

static HANDLEBARS: Lazy<Handlebars<'static>> = Lazy::new(Handlebars::new);

/// Render the verification code body
///
/// # Arguments
/// * `code` - The numeric code to display
/// * `system` - System name shown in the header and footer
/// * `expire_minutes` - Configured code lifetime shown to the reader
pub fn verification_code_body(
    code: &str,
    system: &str,
    expire_minutes: u64,
) -> Result<String, handlebars::RenderError> {
    let data = json!({
        "system": system,
        "code": code,
        "expire_minutes": expire_minutes,
    });

    HANDLEBARS.render_template(VERIFICATION_CODE, &data)
}

/// Render the activation link body for an action
///
/// For password resets a `temp_password` entry in the custom data is
/// rendered into the body; all other custom data is ignored.
pub fn activation_link_body(
    url: &str,
    action: &ActionKind,
    system: &str,
    custom_data: Option<&Value>,
) -> Result<String, handlebars::RenderError> {
    let look = ActionLook::for_action(action);

    let temp_password = match (action, custom_data) {
        (ActionKind::PasswordReset, Some(data)) => {
            data.get("temp_password").and_then(Value::as_str)
        }
        _ => None,
    };

    let data = json!({
        "system": system,
        "title": look.title,
        "message": look.message,
        "button_text": look.button_text,
        "button_color": look.button_color,
        "activation_url": url,
        "temp_password": temp_password,
        "expire_minutes": TOKEN_EXPIRY_MINUTES,
    });

    HANDLEBARS.render_template(ACTIVATION_LINK, &data)
}

/// Per-action wording and styling of the activation mail
struct ActionLook {
    title: &'static str,
    message: &'static str,
    button_text: &'static str,
    button_color: &'static str,
}

impl ActionLook {
    fn for_action(action: &ActionKind) -> Self {
        match action {
            ActionKind::Registration => Self {
                title: "Activate Your Account",
                message: "Thank you for registering. Click the button below to \
                          activate your account.",
                button_text: "Activate Account",
                button_color: "#28a745",
            },
            ActionKind::PasswordReset => Self {
                title: "Reset Your Password",
                message: "We received a request to reset your password. Click the \
                          button below to continue.",
                button_text: "Reset Password",
                button_color: "#dc3545",
            },
            ActionKind::Other(_) => Self {
                title: "Verify Your Email",
                message: "Please confirm your email address by clicking the button \
                          below.",
                button_text: "Verify Email",
                button_color: "#007bff",
            },
        }
    }
}

const VERIFICATION_CODE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Verification code</title>
    <style>
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 600px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f4f4f4;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 10px;
            box-shadow: 0 0 20px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
        }
        .logo {
            font-size: 24px;
            font-weight: bold;
            color: #2c3e50;
            margin-bottom: 10px;
        }
        .code-container {
            background: #f8f9fa;
            border: 2px solid #e9ecef;
            border-radius: 8px;
            padding: 20px;
            text-align: center;
            margin: 20px 0;
        }
        .verification-code {
            font-size: 32px;
            font-weight: bold;
            color: #007bff;
            letter-spacing: 8px;
            margin: 10px 0;
        }
        .warning {
            background: #fff3cd;
            border: 1px solid #ffeaa7;
            border-radius: 5px;
            padding: 15px;
            margin: 20px 0;
            color: #856404;
        }
        .footer {
            margin-top: 30px;
            padding-top: 20px;
            border-top: 1px solid #eee;
            text-align: center;
            color: #666;
            font-size: 14px;
        }
        .highlight {
            color: #007bff;
            font-weight: bold;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="logo">{{system}}</div>
            <h2>Your verification code</h2>
        </div>

        <p>Hello,</p>
        <p>You requested a verification code for <span class="highlight">{{system}}</span>.</p>

        <div class="code-container">
            <p><strong>Your verification code is:</strong></p>
            <div class="verification-code">{{code}}</div>
            <p><small>This code is valid for <span class="highlight">{{expire_minutes}} minutes</span></small></p>
        </div>

        <div class="warning">
            <strong>&#9888; Security notice:</strong>
            <ul style="margin: 10px 0; padding-left: 20px;">
                <li>Never share this code with anyone</li>
                <li>The code can be used once and expires after {{expire_minutes}} minutes</li>
                <li>If you did not request this code, you can ignore this email</li>
            </ul>
        </div>

        <p>If you have trouble signing in, please contact the support team.</p>

        <div class="footer">
            <p>This email was sent automatically by <strong>{{system}}</strong>.</p>
            <p>Please do not reply to this email.</p>
        </div>
    </div>
</body>
</html>
"#;

const ACTIVATION_LINK: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    <style>
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 600px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f4f4f4;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 10px;
            box-shadow: 0 0 20px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
        }
        .logo {
            font-size: 24px;
            font-weight: bold;
            color: #2c3e50;
            margin-bottom: 10px;
        }
        .button-container {
            text-align: center;
            margin: 30px 0;
        }
        .button {
            display: inline-block;
            padding: 14px 32px;
            color: white !important;
            font-size: 16px;
            font-weight: bold;
            text-decoration: none;
            border-radius: 6px;
        }
        .url-box {
            background: #f8f9fa;
            border: 1px solid #e9ecef;
            border-radius: 5px;
            padding: 12px;
            margin: 15px 0;
            font-family: 'Courier New', monospace;
            font-size: 13px;
            word-break: break-all;
            color: #495057;
        }
        .temp-password {
            font-family: 'Courier New', monospace;
            background: #f8f9fa;
            padding: 2px 6px;
            border-radius: 3px;
        }
        .warning {
            background: #fff3cd;
            border: 1px solid #ffeaa7;
            border-radius: 5px;
            padding: 15px;
            margin: 20px 0;
            color: #856404;
        }
        .footer {
            margin-top: 30px;
            padding-top: 20px;
            border-top: 1px solid #eee;
            text-align: center;
            color: #666;
            font-size: 14px;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="logo">{{system}}</div>
            <h2>{{title}}</h2>
        </div>

        <p>Hello,</p>
        <p>{{message}}</p>
{{#if temp_password}}
        <p>Your temporary password is: <strong class="temp-password">{{temp_password}}</strong></p>
{{/if}}

        <div class="button-container">
            <a href="{{{activation_url}}}" class="button" style="background-color: {{button_color}};">{{button_text}}</a>
        </div>

        <p>If the button does not work, copy and paste this link into your browser:</p>
        <div class="url-box">{{{activation_url}}}</div>

        <div class="warning">
            <strong>&#9888; Security notice:</strong>
            <ul style="margin: 10px 0; padding-left: 20px;">
                <li>The link is valid for {{expire_minutes}} minutes</li>
                <li>The link can be used once</li>
                <li>If you did not request this email, you can ignore it</li>
            </ul>
        </div>

        <div class="footer">
            <p>This email was sent automatically by <strong>{{system}}</strong>.</p>
            <p>Please do not reply to this email.</p>
        </div>
    </div>
</body>
</html>
"#;
