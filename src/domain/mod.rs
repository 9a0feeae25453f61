pub mod forms;
pub mod status;

pub use forms::{
    ConsultationSubmit, ContactSubmit, CvSubmit, FormKind, FormSubmission, NewsletterSubmit,
};
pub use status::{StatusCheck, StatusCheckCreate};
