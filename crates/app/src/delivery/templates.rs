//! Verification email content.

use viscend::{
    language::Language,
    verification::{CODE_TTL, VerificationCode},
};

/// Subject and bodies of a verification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl VerificationEmail {
    /// Email content for `code` in `language`.
    pub fn new(code: &VerificationCode, language: Language) -> Self {
        let minutes = CODE_TTL.as_mins();

        Self {
            subject: language
                .pick(
                    "Your VisCend contract verification code",
                    "رمز التحقق من عقد VisCend",
                )
                .to_string(),
            text: text_template(code, language, minutes),
            html: html_template(code, language, minutes),
        }
    }
}

fn text_template(code: &VerificationCode, language: Language, minutes: i64) -> String {
    match language {
        Language::En => format!(
            "Your verification code is: {code}\n\n\
             Enter it to confirm your service agreement. \
             The code is valid for {minutes} minutes.\n\n\
             If you did not request this code, you can ignore this email.\n\n\
             --\nVisCend Studio"
        ),
        Language::Ar => format!(
            "رمز التحقق الخاص بك هو: {code}\n\n\
             أدخل الرمز لتأكيد اتفاقية الخدمة. \
             الرمز صالح لمدة {minutes} دقائق.\n\n\
             إذا لم تطلب هذا الرمز، يمكنك تجاهل هذه الرسالة.\n\n\
             --\nVisCend Studio"
        ),
    }
}

fn html_template(code: &VerificationCode, language: Language, minutes: i64) -> String {
    let direction = language.direction();
    let lang = language.code();
    let dir = direction.as_str();
    let align = direction.align();

    let heading = language.pick("Confirm your contract", "تأكيد العقد");
    let intro = language.pick("Your verification code is:", "رمز التحقق الخاص بك هو:");
    let validity = match language {
        Language::En => format!("This code is valid for {minutes} minutes."),
        Language::Ar => format!("هذا الرمز صالح لمدة {minutes} دقائق."),
    };
    let ignore = language.pick(
        "If you did not request this code, you can ignore this email.",
        "إذا لم تطلب هذا الرمز، يمكنك تجاهل هذه الرسالة.",
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}" dir="{dir}">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{ font-family: 'Segoe UI', Tahoma, Arial, sans-serif; line-height: 1.6; color: #1a1a1a; margin: 0; padding: 0; background: #f4f4f5; text-align: {align}; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 40px 20px; }}
        .card {{ background: #ffffff; border-radius: 8px; padding: 40px; }}
        h1 {{ margin-top: 0; font-size: 22px; }}
        .code {{ font-size: 36px; font-weight: bold; letter-spacing: 8px; text-align: center; padding: 24px; background: #f0f0ff; border-radius: 8px; margin: 24px 0; font-family: 'SF Mono', Monaco, monospace; direction: ltr; }}
        .expires {{ color: #555; font-size: 14px; text-align: center; }}
        .footer {{ margin-top: 32px; padding-top: 20px; border-top: 1px solid #eee; color: #888; font-size: 12px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="card">
            <h1>{heading}</h1>
            <p>{intro}</p>
            <div class="code">{code}</div>
            <p class="expires">{validity}</p>
            <div class="footer">
                <p>{ignore}</p>
                <p>VisCend Studio</p>
            </div>
        </div>
    </div>
</body>
</html>"#
    )
}
