use super::errors::FormErrors;

const INVALID_IMAGE: &str = "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// A featured image submitted for a post.
#[derive(Debug, Clone, Copy)]
pub struct ImageUpload<'a> {
    pub filename: &'a str,
    pub bytes: &'a [u8],
}

impl ImageUpload<'_> {
    /// Accepts common web image formats, checked by extension and file signature.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        if self.filename.trim().is_empty() {
            errors.add("featured_image", "No file was submitted.");
            return Err(errors);
        }
        if self.bytes.is_empty() {
            errors.add("featured_image", "The submitted file is empty.");
            return Err(errors);
        }

        let extension = self
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            errors.add(
                "featured_image",
                format!(
                    "File extension \u{201c}{extension}\u{201d} is not allowed. Allowed extensions are: {}.",
                    ALLOWED_EXTENSIONS.join(", ")
                ),
            );
        } else if !has_image_signature(self.bytes) {
            errors.add("featured_image", INVALID_IMAGE);
        }

        errors.finish(())
    }
}

fn has_image_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(b"\x89PNG\r\n\x1a\n")
        || bytes.starts_with(&[0xFF, 0xD8, 0xFF])
        || bytes.starts_with(b"GIF87a")
        || bytes.starts_with(b"GIF89a")
        || (bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

    #[test]
    fn test_png_accepted() {
        let upload = ImageUpload {
            filename: "cover.PNG",
            bytes: PNG,
        };
        assert!(upload.validate().is_ok());
    }

    #[test]
    fn test_wrong_extension() {
        let upload = ImageUpload {
            filename: "notes.txt",
            bytes: PNG,
        };
        assert!(upload.validate().unwrap_err().has("featured_image"));
    }

    #[test]
    fn test_not_an_image() {
        let upload = ImageUpload {
            filename: "cover.jpg",
            bytes: b"plain text pretending",
        };
        assert_eq!(upload.validate().unwrap_err().get("featured_image"), [INVALID_IMAGE]);
    }

    #[test]
    fn test_empty_file() {
        let upload = ImageUpload {
            filename: "cover.png",
            bytes: &[],
        };
        assert!(upload.validate().is_err());
    }
}
