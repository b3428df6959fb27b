//! Minimal inline HTML views.
//!
//! Rendering is deliberately thin: the gateway's substance is the OAuth
//! flow and the Disk proxy, not page templating.

use diskrelay_disk::{Listing, ResourceKind};

/// Escape text for safe interpolation into HTML.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>{body}</body></html>"
    )
}

/// Landing view: prompt for a public resource key.
pub fn landing() -> String {
    page(
        "diskrelay",
        "<h1>diskrelay</h1>\
         <p><a href=\"/login\">Sign in with Yandex</a></p>\
         <form action=\"/dashboard\" method=\"get\">\
         <input name=\"public_key\" placeholder=\"public resource key\">\
         <button type=\"submit\">Browse</button>\
         </form>",
    )
}

/// Listing view: the directory contents plus a MIME-prefix filter form.
pub fn listing(listing: &Listing, public_key: &str) -> String {
    let mut rows = String::new();
    for item in &listing.items {
        let name = escape(&item.name);
        match item.kind {
            ResourceKind::Dir => {
                let href = format!(
                    "/dashboard?public_key={}&path={}",
                    urlencoding::encode(public_key),
                    urlencoding::encode(&item.path),
                );
                rows.push_str(&format!("<li><a href=\"{href}\">{name}/</a></li>"));
            }
            ResourceKind::File => match &item.download_ref {
                Some(download_ref) => {
                    let href = escape(download_ref);
                    rows.push_str(&format!(
                        "<li>{name} <a href=\"{href}\">download</a></li>"
                    ));
                }
                None => rows.push_str(&format!("<li>{name}</li>")),
            },
        }
    }

    let key = escape(public_key);
    let current = escape(&listing.current_path);
    let body = format!(
        "<h1>{current}</h1>\
         <form action=\"/dashboard?public_key={encoded_key}\" method=\"post\">\
         <input type=\"hidden\" name=\"public_key\" value=\"{key}\">\
         <input name=\"file_type\" placeholder=\"MIME prefix, e.g. image\">\
         <button type=\"submit\">Filter</button>\
         </form>\
         <ul>{rows}</ul>\
         <p><a href=\"/logout\">Log out</a></p>",
        encoded_key = urlencoding::encode(public_key),
    );
    page(&current, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diskrelay_disk::ResourceItem;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn test_landing_links_login() {
        let html = landing();
        assert!(html.contains("/login"));
        assert!(html.contains("public_key"));
    }

    #[test]
    fn test_listing_renders_items() {
        let l = Listing {
            current_path: "/photos".to_string(),
            items: vec![
                ResourceItem {
                    name: "a.png".to_string(),
                    path: "/photos/a.png".to_string(),
                    kind: ResourceKind::File,
                    mime_type: Some("image/png".to_string()),
                    download_ref: Some("/download?public_key=K&path=%2Fphotos%2Fa.png".to_string()),
                },
                ResourceItem {
                    name: "inner".to_string(),
                    path: "/photos/inner".to_string(),
                    kind: ResourceKind::Dir,
                    mime_type: None,
                    download_ref: None,
                },
            ],
        };

        let html = listing(&l, "K");
        assert!(html.contains("a.png"));
        assert!(html.contains("/download?public_key=K"));
        assert!(html.contains("inner/"));
        assert!(html.contains("/logout"));
    }
}
