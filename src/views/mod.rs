//! HTML page rendering with templates compiled into the binary.

use axum::response::Html;
use minijinja::{Environment, Value};
use serde::Serialize;

use crate::errors::AppError;
use crate::upstream::encode_segment;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("users.html", include_str!("../../templates/users.html")),
    ("user_detail.html", include_str!("../../templates/user_detail.html")),
    ("payments.html", include_str!("../../templates/payments.html")),
    ("keys.html", include_str!("../../templates/keys.html")),
    ("referrals.html", include_str!("../../templates/referrals.html")),
    ("servers.html", include_str!("../../templates/servers.html")),
    ("tariffs.html", include_str!("../../templates/tariffs.html")),
    ("coupons.html", include_str!("../../templates/coupons.html")),
    ("gifts.html", include_str!("../../templates/gifts.html")),
];

/// Two decimal places, for money amounts.
fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Identifier encoded for use as one path segment of a `data-endpoint`.
fn segment(value: Value) -> String {
    encode_segment(&value.to_string()).unwrap_or_default()
}

/// Compiled page templates.
#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_filter("money", money);
        env.add_filter("segment", segment);
        Ok(Self { env })
    }

    /// Render `name` with the given context.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, AppError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;
    use serde_json::json;

    #[test]
    fn all_templates_compile() {
        let views = Views::new().unwrap();
        for &(name, _) in TEMPLATES {
            assert!(views.env.get_template(name).is_ok(), "{name} missing");
        }
    }

    #[test]
    fn money_filter_rounds() {
        assert_eq!(money(150.5), "150.50");
        assert_eq!(money(0.0), "0.00");
    }

    #[test]
    fn coupons_page_escapes_values() {
        let views = Views::new().unwrap();
        let html = views
            .render(
                "coupons.html",
                context! {
                    coupons => vec![json!({"code": "<b>X</b>", "amount": 10, "usage_limit": 1, "usage_count": 0})],
                    total_coupons => 1,
                    admin_tg_id => "1",
                },
            )
            .unwrap();
        assert!(html.0.contains("&lt;b&gt;X&lt;/b&gt;"));
        assert!(!html.0.contains("<b>X</b>"));
    }

    #[test]
    fn endpoints_encode_identifiers() {
        let views = Views::new().unwrap();
        let html = views
            .render(
                "servers.html",
                context! {
                    servers => vec![json!({"server_name": "de/1#b", "enabled": true})],
                    total_servers => 1,
                    group_codes => Vec::<String>::new(),
                    admin_tg_id => "1",
                },
            )
            .unwrap();
        assert!(html.0.contains(r#"data-endpoint="/servers/de%2F1%23b""#));
        assert!(!html.0.contains(r#"data-endpoint="/servers/de/1"#));
    }

    #[test]
    fn segment_filter_handles_numbers() {
        assert_eq!(segment(Value::from(42)), "42");
        assert_eq!(segment(Value::from("a b")), "a%20b");
    }

    #[test]
    fn unknown_template_is_error() {
        let views = Views::new().unwrap();
        let err = views.render("missing.html", context! {}).unwrap_err();
        assert!(matches!(err, AppError::Template(_)));
    }
}
