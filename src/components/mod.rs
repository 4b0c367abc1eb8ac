//! UI Components

mod bottom_nav;
mod delete_confirm_button;
mod gallery_screen;
mod image_detail;
mod login_form;
mod offer_board;
mod profile_card;
mod settings_panel;
mod signup_form;
mod toast;
mod upload_form;

pub use bottom_nav::{BottomNav, Tab};
pub use delete_confirm_button::DeleteConfirmButton;
pub use gallery_screen::GalleryScreen;
pub use image_detail::ImageDetail;
pub use login_form::LoginForm;
pub use offer_board::OfferBoard;
pub use profile_card::ProfileCard;
pub use settings_panel::SettingsPanel;
pub use signup_form::SignupForm;
pub use toast::Toast;
pub use upload_form::UploadForm;
