// File: src/pages.rs
// Purpose: The registration form, the error list and the confirmation page

use maud::{html, Markup, Render};
use regform_validation_core::Field;

use crate::error::{format_limit, ErrorList};
use crate::form_field::FieldAttrs;
use crate::layouts::{layout, Slots};
use crate::submission::RegistrationSubmission;
use crate::upload::ImageKind;

/// Client gate script and the wasm validator it loads
pub const CLIENT_SCRIPT: &str = "/static/js/register.js";

const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

/// User text escaped for both element content and quoted attributes
///
/// Escapes single quotes as well, which maud's own escaping leaves alone.
pub struct Escaped<'a>(pub &'a str);

impl Render for Escaped<'_> {
    fn render_to(&self, buffer: &mut String) {
        for c in self.0.chars() {
            match c {
                '&' => buffer.push_str("&amp;"),
                '<' => buffer.push_str("&lt;"),
                '>' => buffer.push_str("&gt;"),
                '"' => buffer.push_str("&quot;"),
                '\'' => buffer.push_str("&#039;"),
                c => buffer.push(c),
            }
        }
    }
}

fn accepted_types() -> String {
    [ImageKind::Jpeg, ImageKind::Png, ImageKind::Gif]
        .iter()
        .map(|kind| kind.mime_type())
        .collect::<Vec<_>>()
        .join(",")
}

/// A validated input with its label and inline error slot
fn validated_input(field: Field, label: &str) -> Markup {
    let attrs = FieldAttrs::for_field(field);
    html! {
        div.field {
            label for=(field.name()) { (label) }
            input id=(field.name()) name=(field.name()) type=(attrs.input_type)
                required[attrs.required] minlength=[attrs.min_length] pattern=[attrs.pattern]
                data-validate=(attrs.data_validate)
                data-required-message=(attrs.required_message)
                data-format-message=[attrs.format_message];
            span.error data-for=(field.name()) {}
        }
    }
}

/// GET / : the registration form
pub fn form_page(courses: &[String], max_photo_bytes: u64) -> Markup {
    let course = FieldAttrs::for_field(Field::Course);
    let script = html! { script type="module" src=(CLIENT_SCRIPT) {} };

    let content = html! {
        header.header {
            h1 { "Student Registration" }
            p.subtitle { "Fill in your details below. Fields marked * are required." }
        }
        div.form-card {
            form id="regForm" method="post" action="/submit" enctype="multipart/form-data" {
                (validated_input(Field::FullName, "Full name *"))
                (validated_input(Field::Email, "Email *"))
                (validated_input(Field::Phone, "Mobile number *"))
                div.field {
                    label for="dob" { "Date of birth" }
                    input id="dob" name="dob" type="date";
                }
                fieldset.field {
                    legend { "Gender" }
                    @for gender in GENDERS {
                        label.inline {
                            input type="radio" name="gender" value=(gender);
                            " " (gender)
                        }
                    }
                }
                div.field {
                    label for="address" { "Address" }
                    textarea id="address" name="address" rows="3" {}
                }
                div.field {
                    label for="course" { "Course *" }
                    select id="course" name="course" required[course.required]
                        data-validate=(course.data_validate)
                        data-required-message=(course.required_message) {
                        option value="" { "Select a course" }
                        @for name in courses {
                            option value=(Escaped(name)) { (Escaped(name)) }
                        }
                    }
                    span.error data-for="course" {}
                }
                div.field {
                    label for="photo" { "Photo (JPG, PNG or GIF, max " (format_limit(&max_photo_bytes)) ")" }
                    input id="photo" name="photo" type="file" accept=(accepted_types());
                }
                button id="submitBtn" class="btn primary" type="submit" { "Register" }
            }
        }
    };

    layout(Slots::new("Student Registration").head_extra(script), content)
}

/// Every problem with the submission, and a way back
pub fn error_page(errors: &ErrorList) -> Markup {
    let content = html! {
        div.form-card {
            h2.error-title { "Submission failed" }
            ul.error-list {
                @for message in errors.iter() {
                    li { (Escaped(message)) }
                }
            }
            p { a.btn.light href="/" { "Go back to form" } }
        }
    };

    layout(Slots::new("Submission - Error"), content)
}

/// The accepted submission, echoed back
pub fn success_page(submission: &RegistrationSubmission, photo_url: Option<&str>) -> Markup {
    let rows = [
        ("Email", submission.email.as_str()),
        ("Mobile", submission.phone.as_str()),
        ("DOB", submission.date_of_birth_display()),
        ("Gender", submission.gender_display()),
        ("Course", submission.course.as_str()),
        ("Address", submission.address_display()),
    ];

    let content = html! {
        header.header {
            h1 { "Registration Received" }
            p.subtitle { "Thank you, your submission was successful." }
        }
        div.display-card {
            div.photo {
                @if let Some(url) = photo_url {
                    img src=(Escaped(url)) alt="Uploaded photo";
                } @else {
                    div.no-photo { "No Photo" }
                }
            }
            div.info {
                div.success { "✔ Submission successful" }
                h2 { (Escaped(&submission.full_name)) }
                @for (label, value) in rows {
                    div.row {
                        span.label { (label) ":" }
                        " "
                        span.value { (Escaped(value)) }
                    }
                }
                p.actions {
                    a.btn.light href="/" { "Submit another response" }
                    button.btn.primary type="button" onclick="window.print()" { "Print" }
                }
            }
        }
        footer.footer {
            small { "Data shown above is what was submitted. Nothing is kept on the server except the optional photo." }
        }
    };

    layout(Slots::new("Submission Successful"), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn submission() -> RegistrationSubmission {
        RegistrationSubmission {
            full_name: "John Doe".to_string(),
            email: "john@x.com".to_string(),
            phone: "9876543210".to_string(),
            date_of_birth: None,
            gender: Some("Male".to_string()),
            address: None,
            course: "Civil".to_string(),
        }
    }

    #[test]
    fn test_escaped_covers_all_specials() {
        assert_eq!(
            Escaped(r#"<a href="x">Tom & 'Jerry'</a>"#).render().into_string(),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(Escaped("plain").render().into_string(), "plain");
    }

    #[test]
    fn test_form_page_carries_rules() {
        let courses = vec!["Civil".to_string(), "R&D".to_string()];
        let page = form_page(&courses, 2 * 1024 * 1024).into_string();

        assert!(page.contains(r#"id="regForm""#));
        assert!(page.contains(r#"enctype="multipart/form-data""#));
        assert!(page.contains(r#"minlength="3""#));
        assert!(page.contains(r#"type="email""#));
        assert!(page.contains(r#"type="tel""#));
        assert!(page.contains(r#"data-for="phone""#));
        assert!(page.contains(r#"pattern="[^0-9]*[6-9](?:[^0-9]*[0-9]){9}[^0-9]*""#));
        assert!(page.contains(r#"data-required-message="Please select a course.""#));
        assert!(page.contains(
            r#"data-format-message="Enter a valid 10-digit mobile starting with 6-9.""#
        ));
        assert!(page.contains("data-validate=\"{&quot;email&quot;:true,&quot;required&quot;:true}\""));
        assert!(page.contains(r#"<option value="R&amp;D">R&amp;D</option>"#));
        assert!(page.contains(r#"accept="image/jpeg,image/png,image/gif""#));
        assert!(page.contains("max 2MB"));
        assert!(page.contains(r#"src="/static/js/register.js""#));
    }

    #[test]
    fn test_error_page_lists_every_message() {
        let errors: ErrorList = ["Valid email is required.", "<b>bad</b>"].into_iter().collect();
        let page = error_page(&errors).into_string();

        assert!(page.contains("<li>Valid email is required.</li>"));
        assert!(page.contains("<li>&lt;b&gt;bad&lt;/b&gt;</li>"));
        assert!(page.contains("Go back to form"));
    }

    #[test]
    fn test_success_page_without_photo() {
        let page = success_page(&submission(), None).into_string();

        assert!(page.contains("No Photo"));
        assert!(!page.contains("<img"));
        assert!(page.contains("<h2>John Doe</h2>"));
        assert!(page.contains(r#"<span class="value">9876543210</span>"#));
        assert!(page.contains(r#"<span class="value">Not provided</span>"#));
        assert!(page.contains(r#"<span class="value">Male</span>"#));
    }

    #[test]
    fn test_success_page_with_photo() {
        let page = success_page(&submission(), Some("uploads/me_1.jpg")).into_string();
        assert!(page.contains(r#"<img src="uploads/me_1.jpg" alt="Uploaded photo">"#));
        assert!(!page.contains("No Photo"));
    }

    #[test]
    fn test_success_page_escapes_user_input() {
        let mut hostile = submission();
        hostile.full_name = r#"<script>alert("x")</script>"#.to_string();
        hostile.address = Some("O'Brien & Sons <HQ>".to_string());

        let page = success_page(&hostile, None).into_string();

        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
        assert!(page.contains("O&#039;Brien &amp; Sons &lt;HQ&gt;"));
    }
}
