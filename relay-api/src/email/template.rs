//! Notification email bodies.
//!
//! The HTML body is a single-card table layout with a green header band,
//! safe against markup injection: every interpolated field goes through
//! [`escape_html`] first, and message newlines become `<br>` tags only
//! after escaping.

/// Escape HTML-significant characters.
///
/// `&` must be replaced first; otherwise the entities introduced by the
/// later replacements would be double-escaped.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Plain-text body for the notification email.
pub fn contact_email_text(name: &str, email: &str, message: &str) -> String {
    format!("From: {name}\nEmail: {email}\n\nMessage:\n{message}")
}

/// HTML body for the notification email.
///
/// `site_name` appears in the footer branding line.
pub fn contact_email_html(name: &str, email: &str, message: &str, site_name: &str) -> String {
    let escaped_name = escape_html(name);
    let escaped_email = escape_html(email);
    let escaped_message = escape_html(message).replace('\n', "<br>");
    let escaped_site = escape_html(site_name);

    format!(
        r##"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="margin:0; padding:0; background:#f4f4f8; font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;">
  <table width="100%" cellpadding="0" cellspacing="0" style="background:#f4f4f8; padding:32px 16px;">
    <tr><td align="center">
      <table width="560" cellpadding="0" cellspacing="0" style="background:#ffffff; border-radius:8px; overflow:hidden;">
        <tr>
          <td style="background:#2d6a4f; padding:20px 28px;">
            <span style="color:#ffffff; font-size:18px; font-weight:600;">New Contact Form Message</span>
          </td>
        </tr>
        <tr>
          <td style="padding:28px;">
            <table width="100%" cellpadding="0" cellspacing="0">
              <tr>
                <td style="padding-bottom:16px;">
                  <span style="font-size:12px; text-transform:uppercase; letter-spacing:0.5px; color:#888;">From</span><br>
                  <span style="font-size:15px; color:#1a1a2e; font-weight:500;">{escaped_name}</span>
                </td>
              </tr>
              <tr>
                <td style="padding-bottom:20px;">
                  <span style="font-size:12px; text-transform:uppercase; letter-spacing:0.5px; color:#888;">Email</span><br>
                  <a href="mailto:{escaped_email}" style="font-size:15px; color:#2d6a4f; text-decoration:none;">{escaped_email}</a>
                </td>
              </tr>
              <tr>
                <td style="border-top:1px solid #e0e0e6; padding-top:20px;">
                  <span style="font-size:12px; text-transform:uppercase; letter-spacing:0.5px; color:#888;">Message</span>
                  <div style="margin-top:8px; font-size:15px; line-height:1.6; color:#333;">{escaped_message}</div>
                </td>
              </tr>
            </table>
          </td>
        </tr>
        <tr>
          <td style="padding:16px 28px; background:#f7f7f8; border-top:1px solid #e0e0e6;">
            <span style="font-size:12px; color:#999;">Sent from the contact form on {escaped_site}</span>
          </td>
        </tr>
      </table>
    </td></tr>
  </table>
</body>
</html>"##
    )
}
