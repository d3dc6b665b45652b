//! Page layout shared by the backend views.

use crate::lang::{translate, Group};
use crate::render::escape_html;
use actix_web::HttpResponse;
use std::fmt::Write;

pub const BACKEND_PATH: &str = "/backend/helper";

/// An escaped label from the `Helper` table.
pub fn label(lang: &str, key: &str) -> String {
    escape_html(translate(lang, Group::Helper, key))
}

fn nav_label(lang: &str, key: &str) -> String {
    escape_html(translate(lang, Group::Navigation, key))
}

/// Builds one backend page. Everything pushed through [`Page::text`] is escaped; the
/// `raw` methods take markup the caller already escaped.
pub struct Page {
    lang: String,
    title: String,
    body: String,
}

impl Page {
    pub fn new(lang: &str, title: &str) -> Self {
        Self {
            lang: lang.to_string(),
            title: title.to_string(),
            body: String::new(),
        }
    }

    pub fn heading(&mut self, text: &str) -> &mut Self {
        let _ = write!(self.body, "<h2>{}</h2>", escape_html(text));
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        let _ = write!(self.body, "<p>{}</p>", escape_html(text));
        self
    }

    pub fn raw(&mut self, html: &str) -> &mut Self {
        self.body.push_str(html);
        self
    }

    /// A table whose header keys are translated and whose cells are already markup.
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> &mut Self {
        self.body.push_str("<table><thead><tr>");
        for header in headers {
            let _ = write!(self.body, "<th>{}</th>", label(&self.lang, header));
        }
        self.body.push_str("</tr></thead><tbody>");
        for row in rows {
            self.body.push_str("<tr>");
            for cell in row {
                let _ = write!(self.body, "<td>{}</td>", cell);
            }
            self.body.push_str("</tr>");
        }
        self.body.push_str("</tbody></table>");
        self
    }

    fn navigation(&self) -> String {
        let lang = &self.lang;
        format!(
            "<nav><a href=\"{base}?lang={lang}\">{list}</a> \
             <a href=\"{base}/template/create?lang={lang}\">{template}</a> \
             <a href=\"{base}/report/create?lang={lang}\">{report}</a></nav>",
            base = BACKEND_PATH,
            lang = escape_html(lang),
            list = nav_label(lang, "List"),
            template = nav_label(lang, "CreateTemplate"),
            report = nav_label(lang, "CreateReport"),
        )
    }

    pub fn render(&self) -> String {
        format!(
            "<!DOCTYPE html><html lang=\"{lang}\"><head><meta charset=\"utf-8\">\
             <title>{title}</title></head><body><header><h1>{module}</h1>{nav}</header>\
             <main><h2>{title}</h2>{body}</main></body></html>",
            lang = escape_html(&self.lang),
            title = escape_html(&self.title),
            module = nav_label(&self.lang, "Helper"),
            nav = self.navigation(),
            body = self.body,
        )
    }

    pub fn response(&self) -> HttpResponse {
        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(self.render())
    }
}

/// An escaped link.
pub fn link(href: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape_html(href), escape_html(text))
}
