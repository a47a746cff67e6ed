//! Notices
//!
//! User-visible, non-blocking notifications raised by the wizard.

use crate::{language::Language, validation::ValidationError};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Something completed
    Success,

    /// Neutral information
    Info,

    /// Degraded but usable outcome
    Warning,

    /// Action failed and can be retried
    Error,
}

/// What a notice reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    /// The draft failed validation
    Validation(ValidationError),

    /// A code was emailed to the client
    CodeSent,

    /// A code was issued but the email could not be delivered
    CodeReady,

    /// A code disclosed through the development fallback
    DevCode(String),

    /// Verify was pressed without a code
    MissingCode,

    /// The code was rejected
    InvalidCode,

    /// The code expired
    ExpiredCode,

    /// The verification code could not be requested
    SendFailed,

    /// The contract could not be submitted
    SubmitFailed,

    /// The contract was stored
    ContractCreated,

    /// Another request is still in flight
    RequestPending,
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,

    /// Content
    pub kind: NoticeKind,
}

impl Notice {
    /// Notice with the level that goes with its kind.
    pub fn new(kind: NoticeKind) -> Self {
        let level = match kind {
            NoticeKind::CodeSent | NoticeKind::DevCode(_) | NoticeKind::ContractCreated => {
                NoticeLevel::Success
            }
            NoticeKind::RequestPending => NoticeLevel::Info,
            NoticeKind::CodeReady => NoticeLevel::Warning,
            NoticeKind::Validation(_)
            | NoticeKind::MissingCode
            | NoticeKind::InvalidCode
            | NoticeKind::ExpiredCode
            | NoticeKind::SendFailed
            | NoticeKind::SubmitFailed => NoticeLevel::Error,
        };

        Self { level, kind }
    }

    /// Message text in the given language.
    pub fn message(&self, language: Language) -> String {
        match &self.kind {
            NoticeKind::Validation(error) => validation_message(*error, language).to_string(),
            NoticeKind::CodeSent => language
                .pick(
                    "Verification code sent to your email",
                    "تم إرسال رمز التحقق إلى بريدك الإلكتروني",
                )
                .to_string(),
            NoticeKind::CodeReady => language
                .pick(
                    "Verification code ready, but the email could not be sent",
                    "رمز التحقق جاهز، لكن تعذر إرسال البريد الإلكتروني",
                )
                .to_string(),
            NoticeKind::DevCode(code) => match language {
                Language::En => {
                    format!("Verification Code: {code} (valid for 10 minutes)")
                }
                Language::Ar => format!("رمز التحقق: {code} (صالح لمدة 10 دقائق)"),
            },
            NoticeKind::MissingCode => language
                .pick("Please enter verification code", "يرجى إدخال رمز التحقق")
                .to_string(),
            NoticeKind::InvalidCode => language
                .pick("Invalid verification code", "رمز التحقق غير صحيح")
                .to_string(),
            NoticeKind::ExpiredCode => language
                .pick(
                    "Verification code expired. Please request a new one",
                    "انتهت صلاحية رمز التحقق. يرجى طلب رمز جديد",
                )
                .to_string(),
            NoticeKind::SendFailed => language
                .pick(
                    "Error sending verification code. Please try again.",
                    "خطأ في إرسال رمز التحقق. يرجى المحاولة مرة أخرى.",
                )
                .to_string(),
            NoticeKind::SubmitFailed => language
                .pick(
                    "Error creating contract. Please try again.",
                    "خطأ في إنشاء العقد. يرجى المحاولة مرة أخرى.",
                )
                .to_string(),
            NoticeKind::ContractCreated => language
                .pick("Contract created successfully!", "تم إنشاء العقد بنجاح!")
                .to_string(),
            NoticeKind::RequestPending => language
                .pick(
                    "Please wait for the current request to finish",
                    "يرجى الانتظار حتى يكتمل الطلب الحالي",
                )
                .to_string(),
        }
    }
}

impl From<NoticeKind> for Notice {
    fn from(kind: NoticeKind) -> Self {
        Self::new(kind)
    }
}

fn validation_message(error: ValidationError, language: Language) -> &'static str {
    match error {
        ValidationError::MissingClientInfo => {
            language.pick("Please fill in client information", "يرجى ملء معلومات العميل")
        }
        ValidationError::InvalidEmail => language.pick(
            "Please enter a valid email address",
            "يرجى إدخال بريد إلكتروني صحيح",
        ),
        ValidationError::MissingProjectInfo => {
            language.pick("Please fill in project details", "يرجى ملء تفاصيل المشروع")
        }
        ValidationError::InvalidCommercialTerms(_) => language.pick(
            "Please check the financial terms and timeline",
            "يرجى مراجعة الشروط المالية والجدول الزمني",
        ),
        ValidationError::TermsNotAgreed => language.pick(
            "Please agree to terms and conditions",
            "يرجى الموافقة على الشروط والأحكام",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_follow_kinds() {
        assert_eq!(Notice::new(NoticeKind::CodeReady).level, NoticeLevel::Warning);
        assert_eq!(Notice::new(NoticeKind::InvalidCode).level, NoticeLevel::Error);
        assert_eq!(Notice::new(NoticeKind::ContractCreated).level, NoticeLevel::Success);
    }

    #[test]
    fn messages_are_bilingual() {
        let notice = Notice::from(NoticeKind::InvalidCode);

        assert_eq!(notice.message(Language::En), "Invalid verification code");
        assert_eq!(notice.message(Language::Ar), "رمز التحقق غير صحيح");
    }

    #[test]
    fn dev_code_message_shows_the_code() {
        let notice = Notice::from(NoticeKind::DevCode("123456".to_string()));

        assert!(notice.message(Language::En).contains("123456"), "code missing");
        assert!(notice.message(Language::Ar).contains("123456"), "code missing");
    }

    #[test]
    fn validation_messages_name_the_group() {
        let notice = Notice::from(NoticeKind::Validation(ValidationError::TermsNotAgreed));

        assert_eq!(
            notice.message(Language::En),
            "Please agree to terms and conditions"
        );
    }
}
