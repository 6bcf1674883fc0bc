use anyhow::Context;
use tera::Tera;

/// Templates are compiled into the binary so the server does not depend on
/// its working directory.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("results.html", include_str!("../../templates/results.html")),
    ("explore.html", include_str!("../../templates/explore.html")),
    ("destinations.html", include_str!("../../templates/destinations.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("register.html", include_str!("../../templates/register.html")),
    ("admin_login.html", include_str!("../../templates/admin_login.html")),
    ("admin_dashboard.html", include_str!("../../templates/admin_dashboard.html")),
    ("admin_user_trips.html", include_str!("../../templates/admin_user_trips.html")),
    ("itinerary_pdf.html", include_str!("../../templates/itinerary_pdf.html")),
];

pub fn load() -> anyhow::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().copied())
        .context("Failed to parse templates")?;
    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_templates_parse() {
        let tera = load().expect("templates load");
        for (name, _) in TEMPLATES {
            assert!(tera.get_template_names().any(|n| n == *name), "{name} missing");
        }
    }
}
