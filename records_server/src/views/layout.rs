//! Shared page chrome: head, header, breadcrumbs, flash.

use std::fmt::Write;

use super::{escape, Flash};

/// A breadcrumb; the last one is rendered without a link.
#[derive(Debug, Clone, Copy)]
pub struct Crumb<'a> {
    pub label: &'a str,
    pub url: Option<&'a str>,
}

pub struct Page<'a> {
    pub site_title: &'a str,
    pub title: &'a str,
    pub breadcrumbs: &'a [Crumb<'a>],
    pub flash: Option<Flash<'a>>,
}

pub fn render(page: &Page<'_>, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 2048);
    let site = escape(page.site_title);
    let title = escape(page.title);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} · {site}</title>\n\
         <script src=\"https://cdn.tailwindcss.com\"></script>\n\
         </head>\n\
         <body class=\"min-h-screen bg-slate-50 text-slate-900\">\n\
         <header class=\"border-b border-slate-200 bg-white\">\
         <div class=\"mx-auto max-w-6xl px-6 py-4\"><a href=\"/\" class=\"text-lg font-semibold\">{site}</a></div>\
         </header>\n<main class=\"mx-auto max-w-6xl px-6 py-8\">\n"
    );

    if !page.breadcrumbs.is_empty() {
        html.push_str(
            "<nav aria-label=\"Breadcrumb\" class=\"mb-6 text-sm text-slate-500\"><ol class=\"flex gap-2\">",
        );
        let last = page.breadcrumbs.len() - 1;
        for (i, crumb) in page.breadcrumbs.iter().enumerate() {
            let label = escape(crumb.label);
            match crumb.url {
                Some(url) if i != last => {
                    let _ = write!(
                        html,
                        "<li><a href=\"{}\" class=\"hover:text-indigo-600\">{label}</a> /</li>",
                        escape(url)
                    );
                }
                _ => {
                    let _ = write!(
                        html,
                        "<li aria-current=\"page\" class=\"text-slate-900\">{label}</li>"
                    );
                }
            }
        }
        html.push_str("</ol></nav>\n");
    }

    match page.flash {
        Some(Flash::Success(message)) => {
            let _ = write!(
                html,
                "<div role=\"status\" class=\"flash flash-success mb-6 rounded-xl bg-emerald-50 px-4 py-3 text-emerald-800\">{}</div>\n",
                escape(message)
            );
        }
        Some(Flash::Error(message)) => {
            let _ = write!(
                html,
                "<div role=\"alert\" class=\"flash flash-error mb-6 rounded-xl bg-rose-50 px-4 py-3 text-rose-800\">{}</div>\n",
                escape(message)
            );
        }
        None => {}
    }

    html.push_str(body);
    html.push_str("\n</main>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_crumb_is_not_a_link() {
        let crumbs = [
            Crumb {
                label: "Dashboard",
                url: Some("/"),
            },
            Crumb {
                label: "Employee Profile",
                url: Some("/employee/"),
            },
        ];
        let html = render(
            &Page {
                site_title: "ZisoDB",
                title: "Employee Profile",
                breadcrumbs: &crumbs,
                flash: Some(Flash::Success("Saved <ok>")),
            },
            "<p>body</p>",
        );
        assert!(html.contains("<a href=\"/\" class=\"hover:text-indigo-600\">Dashboard</a>"));
        assert!(html.contains(
            "<li aria-current=\"page\" class=\"text-slate-900\">Employee Profile</li>"
        ));
        assert!(html.contains("Saved &lt;ok&gt;"));
        assert!(html.contains("<title>Employee Profile · ZisoDB</title>"));
    }
}
