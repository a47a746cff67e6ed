//! Contract Documents
//!
//! Renders a [`ContractDraft`] into a printable, directional HTML document. The
//! same function produces the interactive preview and the stored final document;
//! only the [`Footer`] differs between the two, so the body the client confirms
//! is the body that gets stored.

use jiff::civil::Date;

use crate::{draft::ContractDraft, language::Language};

mod escape;
mod style;

pub use escape::escape_html;

/// Agency name printed on the signature line.
pub const AGENCY_SIGNATORY: &str = "VisCend Studio";

/// What the document footer identifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Footer {
    /// Unverified preview shown before confirmation
    Preview {
        /// Date shown as the issue date
        issued_on: Date,
    },

    /// Final document of a stored contract
    Issued {
        /// Contract identifier
        contract_id: String,

        /// Date the contract was created
        issued_on: Date,
    },
}

impl Footer {
    /// Issue date shown in the footer.
    pub fn issued_on(&self) -> Date {
        match self {
            Footer::Preview { issued_on } | Footer::Issued { issued_on, .. } => *issued_on,
        }
    }
}

/// Rendered contract document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    language: Language,
    body: String,
    footer: String,
}

impl Document {
    /// Language the document was rendered in.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Contract content: header, client, project, financial, timeline, terms and signatures.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Footer markup: issue date, contract id and verification notice.
    pub fn footer(&self) -> &str {
        &self.footer
    }

    /// Page title.
    pub fn title(&self) -> &'static str {
        self.language.pick("Work Contract - VisCend", "عقد عمل - VisCend")
    }

    /// Complete printable HTML page.
    pub fn to_html(&self) -> String {
        let direction = self.language.direction();

        format!(
            "<!DOCTYPE html>\n<html lang=\"{lang}\" dir=\"{dir}\">\n<head>\n<meta charset=\"UTF-8\">\n<title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n{body}{footer}</body>\n</html>\n",
            lang = self.language.locale_tag(),
            dir = direction.as_str(),
            title = self.title(),
            style = style::stylesheet(direction),
            body = self.body,
            footer = self.footer,
        )
    }
}

/// Render a contract document. Pure: equal inputs give equal output.
pub fn render(draft: &ContractDraft, language: Language, footer: &Footer) -> Document {
    Document {
        language,
        body: render_body(draft, language),
        footer: render_footer(language, footer),
    }
}

/// Format a date the way documents display it in the given language.
pub fn format_date(date: Date, language: Language) -> String {
    match language {
        Language::En => date.strftime("%-m/%-d/%Y").to_string(),
        Language::Ar => date.strftime("%Y/%m/%d").to_string(),
    }
}

const STANDARD_TERMS: [(&str, &str); 5] = [
    (
        "The first party (VisCend) commits to providing the agreed services according to the mentioned specifications.",
        "يلتزم الطرف الأول (VisCend) بتقديم الخدمات المتفق عليها وفق المواصفات المذكورة.",
    ),
    (
        "The second party (Client) commits to providing all necessary requirements and information to complete the project.",
        "يلتزم الطرف الثاني (العميل) بتوفير جميع المتطلبات والمعلومات اللازمة لإنجاز المشروع.",
    ),
    (
        "Payment shall be made according to the agreed terms in the financial section.",
        "يتم الدفع وفق الشروط المتفق عليها في القسم المالي.",
    ),
    (
        "Any modifications to the scope of work may result in adjustments to cost and timeline.",
        "أي تعديلات على نطاق العمل قد تؤدي إلى تعديل التكلفة والمدة الزمنية.",
    ),
    (
        "All intellectual property rights of the completed work transfer to the client upon full payment.",
        "جميع حقوق الملكية الفكرية للعمل المنجز تنتقل للعميل بعد استكمال الدفع.",
    ),
];

/// Markup accumulator for one document part.
struct Markup {
    html: String,
    language: Language,
}

impl Markup {
    fn new(language: Language) -> Self {
        Self {
            html: String::new(),
            language,
        }
    }

    fn open_section(&mut self, en: &str, ar: &str) {
        self.html.push_str(&format!(
            "<div class=\"section\">\n<h2 class=\"section-title\">{}</h2>\n",
            self.language.pick(en, ar)
        ));
    }

    fn close(&mut self) {
        self.html.push_str("</div>\n");
    }

    fn field(&mut self, en: &str, ar: &str, value: &str) {
        self.html.push_str(&format!(
            "<div class=\"field\"><span class=\"field-label\">{}</span> <span class=\"field-value\">{}</span></div>\n",
            self.language.pick(en, ar),
            escape_html(value.trim()),
        ));
    }

    fn block_field(&mut self, en: &str, ar: &str, value: &str) {
        self.html.push_str(&format!(
            "<div class=\"field\"><span class=\"field-label\">{}</span><div class=\"field-value block\">{}</div></div>\n",
            self.language.pick(en, ar),
            escape_html(value.trim()),
        ));
    }

    fn optional_field(&mut self, en: &str, ar: &str, value: &str) {
        if !value.trim().is_empty() {
            self.field(en, ar, value);
        }
    }

    fn optional_block_field(&mut self, en: &str, ar: &str, value: &str) {
        if !value.trim().is_empty() {
            self.block_field(en, ar, value);
        }
    }
}

fn render_body(draft: &ContractDraft, language: Language) -> String {
    let mut doc = Markup::new(language);

    doc.html.push_str(&format!(
        "<div class=\"header\">\n<div class=\"logo\">VisCend</div>\n<p>{}</p>\n</div>\n",
        language.pick("Service Agreement Contract", "عقد تقديم خدمات")
    ));

    doc.open_section("Client Information", "معلومات العميل");
    doc.field("Name:", "الاسم:", &draft.client_name);
    doc.field("Email:", "البريد الإلكتروني:", &draft.client_email);
    doc.field("Phone:", "رقم الهاتف:", &draft.client_phone);
    doc.optional_field("Company:", "الشركة:", &draft.client_company);
    doc.close();

    let service = draft
        .service_type
        .map(|service| service.label(language))
        .unwrap_or_default();

    doc.open_section("Project Details", "تفاصيل المشروع");
    doc.field("Service Type:", "نوع الخدمة:", service);
    doc.field("Project Name:", "اسم المشروع:", &draft.project_name);
    doc.block_field("Description:", "الوصف:", &draft.project_description);
    doc.optional_block_field("Features:", "المميزات:", &draft.features);
    doc.optional_block_field("Limitations:", "القيود:", &draft.limitations);
    doc.optional_block_field("Deliverables:", "المخرجات:", &draft.deliverables);
    doc.close();

    doc.open_section("Financial Terms", "الشروط المالية");
    doc.html.push_str(&format!(
        "<div class=\"field\"><span class=\"field-label\">{}</span> <span class=\"field-value cost\">${}</span></div>\n",
        language.pick("Total Cost:", "التكلفة الإجمالية:"),
        escape_html(draft.project_cost.trim()),
    ));
    doc.field("Payment Terms:", "شروط الدفع:", &draft.payment_terms);
    doc.optional_field("Number of Revisions:", "عدد المراجعات:", &draft.revisions);
    doc.close();

    doc.open_section("Timeline", "الجدول الزمني");
    doc.field("Project Duration:", "مدة المشروع:", &draft.project_duration);
    doc.field("Start Date:", "تاريخ البدء:", &draft.start_date);
    doc.close();

    doc.open_section("Terms & Conditions", "الشروط والأحكام");
    doc.html.push_str("<div class=\"terms\">\n<ol class=\"terms-list\">\n");
    for (en, ar) in STANDARD_TERMS {
        doc.html
            .push_str(&format!("<li>{}</li>\n", language.pick(en, ar)));
    }
    if !draft.additional_terms.trim().is_empty() {
        doc.html.push_str(&format!(
            "<li class=\"custom\">{}</li>\n",
            escape_html(draft.additional_terms.trim())
        ));
    }
    doc.html.push_str("</ol>\n</div>\n");
    doc.close();

    doc.html.push_str(&format!(
        "<div class=\"signature-section\">\n<div class=\"signature-box\"><p>{}</p><p class=\"signature-name\">{}</p></div>\n<div class=\"signature-box\"><p>{}</p><p class=\"signature-name\">{AGENCY_SIGNATORY}</p></div>\n</div>\n",
        language.pick("Client Signature", "توقيع العميل"),
        escape_html(draft.client_name.trim()),
        language.pick("VisCend Signature", "توقيع VisCend"),
    ));

    doc.html
}

fn render_footer(language: Language, footer: &Footer) -> String {
    let mut html = String::from("<div class=\"footer\">\n");

    html.push_str(&format!(
        "<p>{}: {}</p>\n",
        language.pick("Issue Date", "تاريخ الإصدار"),
        format_date(footer.issued_on(), language)
    ));

    match footer {
        Footer::Preview { .. } => {
            html.push_str(&format!(
                "<p class=\"draft-notice\">{}</p>\n",
                language.pick(
                    "Draft for review - not yet verified",
                    "مسودة للمراجعة - لم يتم التحقق بعد"
                )
            ));
        }
        Footer::Issued { contract_id, .. } => {
            html.push_str(&format!(
                "<p>{}: {}</p>\n",
                language.pick("Contract ID", "رقم العقد"),
                escape_html(contract_id)
            ));
        }
    }

    html.push_str(&format!(
        "<p><strong>VisCend</strong> - {}</p>\n<p>{}</p>\n</div>\n",
        language.pick(
            "Pioneers of Visual Innovation & Digital Excellence",
            "رواد الإبداع البصري والتطوير الرقمي"
        ),
        language.pick(
            "This contract is digitally signed and verified through electronic verification system",
            "هذا العقد موقع رقمياً ومعتمد بموجب نظام التحقق الإلكتروني"
        ),
    ));

    html
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::draft::ServiceType;

    fn draft() -> ContractDraft {
        ContractDraft {
            client_name: "Omar <Admin>".to_string(),
            client_email: "omar@example.com".to_string(),
            client_phone: "0500000000".to_string(),
            service_type: Some(ServiceType::Web),
            project_name: "Storefront".to_string(),
            project_description: "A bilingual storefront".to_string(),
            project_cost: "12000".to_string(),
            additional_terms: "Hosting billed separately".to_string(),
            terms_agreed: true,
            ..ContractDraft::default()
        }
    }

    fn issued() -> Footer {
        Footer::Issued {
            contract_id: "0199c6a2-0000-7000-8000-000000000001".to_string(),
            issued_on: date(2026, 10, 16),
        }
    }

    #[test]
    fn preview_and_issued_bodies_are_identical() {
        for language in [Language::En, Language::Ar] {
            let preview = render(
                &draft(),
                language,
                &Footer::Preview {
                    issued_on: date(2026, 10, 15),
                },
            );
            let final_doc = render(&draft(), language, &issued());

            assert_eq!(preview.body(), final_doc.body(), "bodies differ for {language}");
            assert_ne!(preview.footer(), final_doc.footer(), "footers should differ");
        }
    }

    #[test]
    fn arabic_documents_are_right_to_left() {
        let html = render(&draft(), Language::Ar, &issued()).to_html();

        assert!(html.contains("<html lang=\"ar-SA\" dir=\"rtl\">"), "missing rtl direction");
        assert!(html.contains("text-align: right"), "missing right alignment");
        assert!(html.contains("تطوير المواقع"), "missing Arabic service label");
    }

    #[test]
    fn english_documents_are_left_to_right() {
        let html = render(&draft(), Language::En, &issued()).to_html();

        assert!(html.starts_with("<!DOCTYPE html>"), "missing doctype");
        assert!(html.contains("<html lang=\"en-US\" dir=\"ltr\">"), "missing ltr direction");
        assert!(html.contains("Web Development"), "missing service label");
    }

    #[test]
    fn user_text_is_escaped() {
        let doc = render(&draft(), Language::En, &issued());

        assert!(doc.body().contains("Omar &lt;Admin&gt;"), "name not escaped");
        assert!(!doc.body().contains("<Admin>"), "raw markup leaked");
    }

    #[test]
    fn additional_terms_follow_the_standard_five() {
        let doc = render(&draft(), Language::En, &issued());
        let body = doc.body();

        assert_eq!(body.matches("<li").count(), 6, "expected five standard terms plus one");
        assert!(
            body.contains("<li class=\"custom\">Hosting billed separately</li>"),
            "additional terms missing"
        );
    }

    #[test]
    fn optional_fields_are_omitted_when_blank() {
        let blank = ContractDraft {
            additional_terms: String::new(),
            revisions: String::new(),
            ..draft()
        };
        let body = render(&blank, Language::En, &issued()).body().to_string();

        assert!(!body.contains("Company:"), "company should be omitted");
        assert!(!body.contains("Features:"), "features should be omitted");
        assert!(!body.contains("Number of Revisions:"), "revisions should be omitted");
        assert_eq!(body.matches("<li").count(), 5, "only the standard terms expected");
    }

    #[test]
    fn signatures_name_client_and_agency() {
        let body = render(&draft(), Language::En, &issued()).body().to_string();

        assert!(body.contains("Client Signature"), "client signature missing");
        assert!(body.contains(AGENCY_SIGNATORY), "agency signature missing");
    }

    #[test]
    fn issued_footer_carries_the_contract_id() {
        let doc = render(&draft(), Language::En, &issued());

        assert!(
            doc.footer().contains("0199c6a2-0000-7000-8000-000000000001"),
            "contract id missing"
        );
        assert!(doc.footer().contains("10/16/2026"), "issue date missing");
    }

    #[test]
    fn preview_footer_is_marked_as_draft() {
        let doc = render(
            &draft(),
            Language::En,
            &Footer::Preview {
                issued_on: date(2026, 1, 5),
            },
        );

        assert!(doc.footer().contains("not yet verified"), "draft notice missing");
        assert!(!doc.footer().contains("Contract ID"), "preview has no contract id");
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(
            render(&draft(), Language::Ar, &issued()),
            render(&draft(), Language::Ar, &issued())
        );
    }

    #[test]
    fn dates_follow_the_language() {
        assert_eq!(format_date(date(2026, 3, 7), Language::En), "3/7/2026");
        assert_eq!(format_date(date(2026, 3, 7), Language::Ar), "2026/03/07");
    }
}
