//! Per-language reminder email content.
//!
//! Subjects live here as constants; bodies are HTML files embedded at
//! compile time and rendered with the attendee's name. Registrations
//! in a language the form never offered get the Dutch template.

use anyhow::{Context as AnyhowContext, Result};
use tera::{Context, Tera};

use crate::registrations::Language;

const BODY_NL: &str = include_str!("../../../templates/reminder_nl.html");
const BODY_EN: &str = include_str!("../../../templates/reminder_en.html");
const BODY_AR: &str = include_str!("../../../templates/reminder_ar.html");
const BODY_TR: &str = include_str!("../../../templates/reminder_tr.html");

pub const SUBJECT_NL: &str = "Herinnering: Utrecht Symposium - 15 Oktober 2025";
pub const SUBJECT_EN: &str = "Reminder: Utrecht Symposium - October 15, 2025";
pub const SUBJECT_AR: &str = "تذكير: ندوة أوتريخت - 15 أكتوبر 2025";
pub const SUBJECT_TR: &str = "Hatırlatma: Utrecht Sempozyumu - 15 Ekim 2025";

fn template_name(language: Language) -> &'static str {
    match language {
        Language::Nl => "reminder_nl.html",
        Language::En => "reminder_en.html",
        Language::Ar => "reminder_ar.html",
        Language::Tr => "reminder_tr.html",
    }
}

/// Registry of reminder templates, parsed once at startup.
pub struct ReminderTemplates {
    tera: Tera,
}

impl ReminderTemplates {
    pub fn new() -> Result<ReminderTemplates> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("reminder_nl.html", BODY_NL),
            ("reminder_en.html", BODY_EN),
            ("reminder_ar.html", BODY_AR),
            ("reminder_tr.html", BODY_TR),
        ])
        .context("reminder templates failed to parse")?;
        Ok(ReminderTemplates { tera })
    }

    pub fn subject(&self, language: Language) -> &'static str {
        match language {
            Language::Nl => SUBJECT_NL,
            Language::En => SUBJECT_EN,
            Language::Ar => SUBJECT_AR,
            Language::Tr => SUBJECT_TR,
        }
    }

    /// Render the body for one attendee.
    pub fn render_body(&self, language: Language, name: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("name", name);
        self.tera
            .render(template_name(language), &context)
            .with_context(|| format!("reminder template for {} failed to render", language.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_parse_and_render() {
        let templates = ReminderTemplates::new().unwrap();
        for language in [Language::Nl, Language::En, Language::Ar, Language::Tr] {
            let body = templates.render_body(language, "Sam").unwrap();
            assert!(body.contains("Sam"), "{} body drops the name", language.code());
            assert!(body.contains("maps.app.goo.gl"));
        }
    }

    #[test]
    fn test_bodies_are_localized() {
        let templates = ReminderTemplates::new().unwrap();
        assert!(templates.render_body(Language::Nl, "J").unwrap().contains("Beste J"));
        assert!(templates.render_body(Language::En, "J").unwrap().contains("Dear J"));
        assert!(templates.render_body(Language::Tr, "J").unwrap().contains("Sayın J"));
    }

    #[test]
    fn test_arabic_body_is_right_to_left() {
        let templates = ReminderTemplates::new().unwrap();
        let body = templates.render_body(Language::Ar, "سمير").unwrap();
        assert!(body.contains("dir=\"rtl\""));
        assert!(body.contains("سمير"));
    }

    #[test]
    fn test_subjects_per_language() {
        let templates = ReminderTemplates::new().unwrap();
        assert_eq!(templates.subject(Language::Nl), SUBJECT_NL);
        assert_eq!(templates.subject(Language::En), SUBJECT_EN);
        assert_eq!(templates.subject(Language::Ar), SUBJECT_AR);
        assert_eq!(templates.subject(Language::Tr), SUBJECT_TR);
    }

    #[test]
    fn test_rendering_escapes_markup_in_names() {
        let templates = ReminderTemplates::new().unwrap();
        let body = templates
            .render_body(Language::En, "<script>alert(1)</script>")
            .unwrap();
        assert!(!body.contains("<script>"));
    }
}
