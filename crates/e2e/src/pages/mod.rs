//! Page objects for the staffinc web app

pub mod auth;
pub mod dynamic_form;
pub mod form_creation;
pub mod form_list;
pub mod forgot_password;
pub mod login;

pub use auth::AuthPage;
pub use dynamic_form::DynamicFormPage;
pub use form_creation::{CreationStepper, FormCreationStep1Page, LimitBasedOn};
pub use form_list::FormListPage;
pub use forgot_password::ForgotPasswordPage;
pub use login::LoginPage;
