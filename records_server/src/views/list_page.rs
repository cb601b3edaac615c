//! Record table for one entity kind.

use std::fmt::Write;

use super::escape;
use super::layout::{self, Crumb, Page};
use crate::registry::PageConfig;
use crate::services::listing::Table;

pub fn render(site_title: &str, config: &'static PageConfig, table: &Table) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        "<section class=\"mb-8 flex items-start justify-between gap-6\">\
         <div><h1 class=\"text-2xl font-semibold\">{} {}</h1>\
         <p class=\"mt-2 text-slate-600\">{}</p></div>\
         <a href=\"{}\" class=\"rounded-xl bg-indigo-600 px-4 py-2.5 text-sm font-semibold text-white\">{}</a>\
         </section>\n",
        escape(config.icon),
        escape(config.list_label),
        escape(config.description),
        escape(config.entity.create_path()),
        escape(config.cta)
    );

    if table.rows.is_empty() {
        let _ = write!(
            body,
            "<p class=\"empty-state rounded-2xl bg-white p-8 text-center text-slate-500\">{}</p>",
            escape(config.empty_message)
        );
    } else {
        body.push_str(
            "<div class=\"overflow-x-auto rounded-2xl bg-white shadow-sm\">\
             <table class=\"min-w-full divide-y divide-slate-200 text-sm\">\n<thead><tr>",
        );
        for header in &table.headers {
            let _ = write!(
                body,
                "<th scope=\"col\" class=\"px-4 py-3 text-left font-semibold\">{}</th>",
                escape(header)
            );
        }
        body.push_str("</tr></thead>\n<tbody>\n");
        for row in &table.rows {
            body.push_str("<tr>");
            for cell in row {
                let _ = write!(body, "<td class=\"px-4 py-3\">{}</td>", escape(cell));
            }
            body.push_str("</tr>\n");
        }
        body.push_str("</tbody>\n</table></div>\n");
    }

    let pages = &table.pagination;
    if pages.total_pages > 1 {
        body.push_str("<nav class=\"pagination mt-6 flex items-center gap-4 text-sm\">");
        if pages.has_previous() {
            let _ = write!(body, "<a href=\"?page={}\" rel=\"prev\">Previous</a>", pages.page - 1);
        }
        let _ = write!(
            body,
            "<span>Page {} of {} ({} records)</span>",
            pages.page, pages.total_pages, pages.total_records
        );
        if pages.has_next() {
            let _ = write!(body, "<a href=\"?page={}\" rel=\"next\">Next</a>", pages.page + 1);
        }
        body.push_str("</nav>");
    }

    let crumbs = [
        Crumb {
            label: "Dashboard",
            url: Some("/"),
        },
        Crumb {
            label: config.title,
            url: Some(config.entity.create_path()),
        },
        Crumb {
            label: config.list_label,
            url: None,
        },
    ];
    layout::render(
        &Page {
            site_title,
            title: config.list_label,
            breadcrumbs: &crumbs,
            flash: None,
        },
        &body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::registry::page_config;
    use crate::services::listing::Pagination;

    #[test]
    fn empty_table_shows_the_empty_message() {
        let config = page_config(EntityKind::Company);
        let table = Table {
            headers: vec!["ID".into()],
            rows: vec![],
            pagination: Pagination::new(None, 0, 25),
        };
        let html = render("ZisoDB", config, &table);
        assert!(html.contains(&*escape(config.empty_message)));
        assert!(!html.contains("<tbody>"));
        assert!(!html.contains("pagination"));
    }

    #[test]
    fn rows_and_pager_are_rendered() {
        let config = page_config(EntityKind::Company);
        let table = Table {
            headers: vec!["ID".into(), "Name".into()],
            rows: vec![vec!["1".into(), "Acme & Sons".into()]],
            pagination: Pagination::new(Some(2), 30, 25),
        };
        let html = render("ZisoDB", config, &table);
        assert!(html.contains("<td class=\"px-4 py-3\">Acme &amp; Sons</td>"));
        assert!(html.contains("Page 2 of 2 (30 records)"));
        assert!(html.contains("href=\"?page=1\" rel=\"prev\""));
        assert!(!html.contains("rel=\"next\""));
    }
}
