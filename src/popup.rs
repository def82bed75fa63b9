//! Popup snippets shown when a point of interest is clicked.
//!
//! Fields are checked in a fixed order (title, description, link, photo) and
//! the first violation is returned. Accepted fields are embedded verbatim.
use url::Url;

use crate::ValidationError;

pub const MAX_TITLE_LEN: usize = 40;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MAX_LINK_LEN: usize = 150;

const IMAGE_EXTENSIONS: [&str; 2] = [".jpg", ".png"];
const LINK_LABEL: &str = "Mehr Info";

/// Popup for a point of a dataset without links.
pub fn render(title: &str, description: &str, photo_url: &str) -> Result<String, ValidationError> {
    check_title(title)?;
    check_description(description)?;
    check_photo(photo_url)?;
    Ok(snippet(title, description, photo_url, None))
}

/// Popup for a point of a dataset carrying an external link.
pub fn render_with_link(
    title: &str,
    description: &str,
    photo_url: &str,
    link: &str,
) -> Result<String, ValidationError> {
    check_title(title)?;
    check_description(description)?;
    check_link(link)?;
    check_photo(photo_url)?;
    Ok(snippet(title, description, photo_url, Some(link)))
}

fn check_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong {
            len,
            max: MAX_TITLE_LEN,
        });
    }
    Ok(())
}

fn check_description(description: &str) -> Result<(), ValidationError> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong {
            len,
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

fn check_link(link: &str) -> Result<(), ValidationError> {
    let len = link.chars().count();
    if len > MAX_LINK_LEN {
        return Err(ValidationError::LinkTooLong {
            len,
            max: MAX_LINK_LEN,
        });
    }
    let url = Url::parse(link).map_err(|source| ValidationError::MalformedLink {
        link: link.to_owned(),
        source,
    })?;
    // mailto: and data: parse fine but lead nowhere in a new tab
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::LinkWithoutHost(link.to_owned()));
    }
    Ok(())
}

// substring, not suffix: "photo.jpg?w=300" is accepted
fn check_photo(photo_url: &str) -> Result<(), ValidationError> {
    if IMAGE_EXTENSIONS.iter().any(|ext| photo_url.contains(ext)) {
        Ok(())
    } else {
        Err(ValidationError::NotAnImage(photo_url.to_owned()))
    }
}

fn snippet(title: &str, description: &str, photo_url: &str, link: Option<&str>) -> String {
    let button = link.map_or_else(String::new, |link| {
        format!(
            "<a href='{link}' target='_blank' rel='noopener'><button type='button'>{LINK_LABEL}</button></a>\n"
        )
    });
    format!(
        "<html>\n<h1>{title}</h1>\n<img src='{photo_url}' alt='{title}' width='100%'>\n<p>{description}</p>\n{button}</html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "https://www.example.org/stadion";

    #[test]
    fn is_html() {
        let info = render("title", "descr", "url.jpg").unwrap();
        assert!(info.contains("<html>"));
        assert!(info.contains("</html>"));
    }

    #[test]
    fn snippet_layout() {
        assert_eq!(
            render_with_link("Stadion", "Heimstätte", "stadion.jpg", LINK).unwrap(),
            "<html>\n<h1>Stadion</h1>\n<img src='stadion.jpg' alt='Stadion' width='100%'>\n\
             <p>Heimstätte</p>\n<a href='https://www.example.org/stadion' target='_blank' \
             rel='noopener'><button type='button'>Mehr Info</button></a>\n</html>"
        );
        assert_eq!(
            render("Stadion", "Heimstätte", "stadion.jpg").unwrap(),
            "<html>\n<h1>Stadion</h1>\n<img src='stadion.jpg' alt='Stadion' width='100%'>\n\
             <p>Heimstätte</p>\n</html>"
        );
    }

    #[test]
    fn contains_fields_verbatim() {
        let info = render("Stadion", "Heimstätte", "stadion.jpg").unwrap();
        assert!(info.contains("<h1>Stadion</h1>"));
        assert!(info.contains("<p>Heimstätte</p>"));
        assert!(info.contains("src='stadion.jpg'"));
        assert!(!info.contains("<a href"));
    }

    #[test]
    fn keeps_escaped_paths_untouched() {
        let url = "data\\/photos\\/v_platz.jpg";
        let info = render("title", "descr", url).unwrap();
        assert!(info.contains(&format!("src='{url}'")));
    }

    #[test]
    fn limits_are_inclusive() {
        let title = "a".repeat(MAX_TITLE_LEN);
        let description = "d".repeat(MAX_DESCRIPTION_LEN);
        let info = render(&title, &description, "p.png").unwrap();
        assert!(info.contains(&format!("<h1>{title}</h1>")));
        assert!(info.contains(&format!("<p>{description}</p>")));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let title = "ä".repeat(MAX_TITLE_LEN);
        assert!(render(&title, "x", "p.png").is_ok());
    }

    #[test]
    fn rejects_long_title() {
        assert_eq!(
            render(&"a".repeat(41), "x", "p.png"),
            Err(ValidationError::TitleTooLong { len: 41, max: 40 })
        );
    }

    #[test]
    fn rejects_long_description() {
        assert!(matches!(
            render("title", &"a".repeat(1001), "url.png"),
            Err(ValidationError::DescriptionTooLong { len: 1001, .. })
        ));
    }

    #[test]
    fn rejects_non_images() {
        for url in ["data\\/photos\\/v_platz.txt", "data\\/photos\\/v_platzjpg", "photo.JPG"] {
            assert_eq!(
                render("title", "descr", url),
                Err(ValidationError::NotAnImage(url.to_owned()))
            );
        }
    }

    #[test]
    fn accepts_image_extension_anywhere() {
        assert!(render("title", "descr", "https://cdn.example.org/a.jpg?w=300").is_ok());
    }

    #[test]
    fn renders_link_button() {
        let info = render_with_link("Stadion", "Heimstätte", "stadion.jpg", LINK).unwrap();
        assert!(info.contains(&format!("<a href='{LINK}' target='_blank'")));
        assert!(info.contains("<h1>Stadion</h1>"));
    }

    #[test]
    fn rejects_long_link() {
        let link = format!("https://example.org/{}", "a".repeat(140));
        assert!(matches!(
            render_with_link("t", "d", "p.jpg", &link),
            Err(ValidationError::LinkTooLong { max: 150, .. })
        ));
    }

    #[test]
    fn accepts_link_of_maximal_length() {
        let link = format!("https://example.org/{}", "a".repeat(130));
        assert_eq!(link.chars().count(), MAX_LINK_LEN);
        let info = render_with_link("t", "d", "p.jpg", &link).unwrap();
        assert!(info.contains(&format!("<a href='{link}'")));
    }

    #[test]
    fn rejects_malformed_links() {
        assert!(matches!(
            render_with_link("t", "d", "p.jpg", "www.example.org"),
            Err(ValidationError::MalformedLink { .. })
        ));
        assert!(matches!(
            render_with_link("t", "d", "p.jpg", "mailto:info@example.org"),
            Err(ValidationError::LinkWithoutHost(_))
        ));
    }

    #[test]
    fn checks_fields_in_order() {
        let long_title = "a".repeat(41);
        let long_description = "a".repeat(1001);
        assert!(matches!(
            render_with_link(&long_title, &long_description, "p.txt", "nope"),
            Err(ValidationError::TitleTooLong { .. })
        ));
        assert!(matches!(
            render_with_link("t", &long_description, "p.txt", "nope"),
            Err(ValidationError::DescriptionTooLong { .. })
        ));
        assert!(matches!(
            render_with_link("t", "d", "p.txt", "nope"),
            Err(ValidationError::MalformedLink { .. })
        ));
        assert!(matches!(
            render_with_link("t", "d", "p.txt", LINK),
            Err(ValidationError::NotAnImage(_))
        ));
    }
}
