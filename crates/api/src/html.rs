//! Server-rendered pages: the registrant list and the registration form.
//!
//! Every piece of user-provided text goes through [`escape`] before it
//! reaches the markup. Labels, paths and validator messages are ours and
//! are written as-is.

use signup_core::form::{FormField, RegistrationForm};
use signup_core::registrant::Registrant;

use crate::config::page_path;

/// Shown above the form after a successful submission.
pub const SUCCESS_MESSAGE: &str = "✓ Inscription réussie ! Les données ont été sauvegardées.";

/// Escape user text for element content and quoted attributes.
///
/// Spaces and slashes come out as numeric entities too, which browsers
/// render unchanged.
pub fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"fr\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <div class=\"App\">\n{body}</div>\n\
         </body>\n\
         </html>\n"
    )
}

/// Home page: count, table of registrants (when any), link to the form.
pub fn render_home(base_path: &str, registrants: &[Registrant]) -> String {
    let count = registrants.len();
    let register = page_path(base_path, "/register");

    let mut body = String::new();
    body.push_str("<div class=\"home-container\">\n");
    body.push_str("<h1>Bienvenue sur notre application d'inscription</h1>\n");
    body.push_str(&format!(
        "<p class=\"user-count\">{count} utilisateur(s) inscrit(s)</p>\n"
    ));

    if !registrants.is_empty() {
        body.push_str("<div class=\"users-list\">\n<h2>Liste des inscrits</h2>\n<table>\n");
        body.push_str(
            "<thead><tr><th>Prénom</th><th>Nom</th><th>Email</th><th>Ville</th></tr></thead>\n",
        );
        body.push_str("<tbody>\n");
        for registrant in registrants {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&registrant.first_name),
                escape(&registrant.last_name),
                escape(&registrant.email),
                escape(&registrant.city),
            ));
        }
        body.push_str("</tbody>\n</table>\n</div>\n");
    }

    body.push_str(&format!(
        "<a href=\"{register}\" class=\"register-link\">S'inscrire</a>\n"
    ));
    body.push_str("</div>\n");

    layout("Inscription", &body)
}

fn render_field(form: &RegistrationForm, field: FormField) -> String {
    let name = field.name();
    let label = field.label();
    let input_type = field.input_type();
    let value = escape(form.value(field));

    match form.error(field) {
        Some(error) => format!(
            "<div class=\"form-group\">\n\
             <label for=\"{name}\">{label} *</label>\n\
             <input type=\"{input_type}\" id=\"{name}\" name=\"{name}\" value=\"{value}\" class=\"error\">\n\
             <span class=\"error-message\" data-testid=\"{name}-error\">{}</span>\n\
             </div>\n",
            error.message
        ),
        None => format!(
            "<div class=\"form-group\">\n\
             <label for=\"{name}\">{label} *</label>\n\
             <input type=\"{input_type}\" id=\"{name}\" name=\"{name}\" value=\"{value}\">\n\
             </div>\n"
        ),
    }
}

/// Registration page with current values, per-field errors and an
/// optional success banner.
pub fn render_registration(base_path: &str, form: &RegistrationForm, succeeded: bool) -> String {
    let action = page_path(base_path, "/register");
    let home = page_path(base_path, "/");

    let mut body = String::new();
    body.push_str("<div class=\"registration-form-container\">\n");
    body.push_str("<h2>Formulaire d'Inscription</h2>\n");

    if succeeded {
        body.push_str(&format!(
            "<div class=\"toaster success\" data-testid=\"success-toaster\">{SUCCESS_MESSAGE}</div>\n"
        ));
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"{action}\" class=\"registration-form\">\n"
    ));
    for field in FormField::ALL {
        body.push_str(&render_field(form, field));
    }
    body.push_str(
        "<button type=\"submit\" class=\"submit-button\" data-testid=\"submit-button\">S'inscrire</button>\n",
    );
    body.push_str("</form>\n");
    body.push_str(&format!("<a href=\"{home}\" class=\"home-link\">Accueil</a>\n"));
    body.push_str("</div>\n");

    layout("Formulaire d'Inscription", &body)
}
