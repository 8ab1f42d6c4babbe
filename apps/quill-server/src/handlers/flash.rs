//! One-shot notices carried across a redirect in a cookie.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};

use quill_core::services::{DENIED_DELETE, DENIED_EDIT};

pub const FLASH_COOKIE: &str = "quill_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    CommentSubmitted,
    PostCreated,
    PostUpdated,
    PostDeleted,
    EditDenied,
    DeleteDenied,
    Welcome,
}

const ALL: [Flash; 7] = [
    Flash::CommentSubmitted,
    Flash::PostCreated,
    Flash::PostUpdated,
    Flash::PostDeleted,
    Flash::EditDenied,
    Flash::DeleteDenied,
    Flash::Welcome,
];

impl Flash {
    pub fn code(self) -> &'static str {
        match self {
            Flash::CommentSubmitted => "comment-submitted",
            Flash::PostCreated => "post-created",
            Flash::PostUpdated => "post-updated",
            Flash::PostDeleted => "post-deleted",
            Flash::EditDenied => "edit-denied",
            Flash::DeleteDenied => "delete-denied",
            Flash::Welcome => "welcome",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::CommentSubmitted => "Your comment has been submitted and is awaiting approval.",
            Flash::PostCreated => "Your post has been created successfully!",
            Flash::PostUpdated => "Your post has been updated successfully!",
            Flash::PostDeleted => "Your post has been deleted.",
            Flash::EditDenied => DENIED_EDIT,
            Flash::DeleteDenied => DENIED_DELETE,
            Flash::Welcome => "Welcome! Your account has been created successfully.",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        ALL.into_iter().find(|flash| flash.code() == code)
    }

    /// The notice for an access denial reason.
    pub fn for_denial(reason: &str) -> Self {
        if reason == DENIED_DELETE {
            Flash::DeleteDenied
        } else {
            Flash::EditDenied
        }
    }

    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, self.code())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }
}

/// The pending notice on this request, if any.
pub fn pending(req: &HttpRequest) -> Option<Flash> {
    req.cookie(FLASH_COOKIE)
        .and_then(|cookie| Flash::from_code(cookie.value()))
}

/// Cookie that consumes the pending notice.
pub fn removal() -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for flash in ALL {
            assert_eq!(Flash::from_code(flash.code()), Some(flash));
        }
        assert_eq!(Flash::from_code("bogus"), None);
    }

    #[test]
    fn test_denial_reason_maps_to_notice() {
        assert_eq!(Flash::for_denial(DENIED_DELETE), Flash::DeleteDenied);
        assert_eq!(Flash::for_denial(DENIED_EDIT).message(), DENIED_EDIT);
    }
}
