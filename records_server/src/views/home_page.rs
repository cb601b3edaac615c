//! Dashboard with one card per record kind.

use std::fmt::Write;

use super::escape;
use super::layout::{self, Page};
use crate::dashboard::Card;

pub const TITLE: &str = "Intelligence workspace";

pub fn render(site_title: &str, cards: &[Card]) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1 class=\"mb-8 text-3xl font-semibold\">{}</h1>\n\
         <div class=\"grid gap-6 sm:grid-cols-2 lg:grid-cols-3\">\n",
        escape(TITLE)
    );

    for card in cards {
        let noun = if card.count == 1 { "record" } else { "records" };
        let _ = write!(
            body,
            "<article class=\"card rounded-2xl bg-white p-6 shadow-sm\" data-entity=\"{key}\">\
             <div class=\"text-3xl\">{icon}</div>\
             <h2 class=\"mt-3 text-lg font-semibold\">{title}</h2>\
             <p class=\"mt-2 text-sm text-slate-600\">{description}</p>\
             <p class=\"mt-4 text-sm\"><span class=\"record-count font-semibold\" data-count=\"{count}\">{count}</span> {noun}</p>\
             <div class=\"mt-4 flex gap-3 text-sm\">\
             <a href=\"{url}\" class=\"font-semibold text-indigo-600\">{cta}</a>\
             <a href=\"{list_url}\" class=\"text-slate-600\">{list_label}</a>\
             </div></article>\n",
            key = card.entity.key(),
            icon = escape(card.icon),
            title = escape(card.title),
            description = escape(card.description),
            count = card.count,
            url = escape(card.url),
            cta = escape(card.cta),
            list_url = escape(card.list_url),
            list_label = escape(card.list_label),
        );
    }
    body.push_str("</div>");

    layout::render(
        &Page {
            site_title,
            title: TITLE,
            breadcrumbs: &[],
            flash: None,
        },
        &body,
    )
}
