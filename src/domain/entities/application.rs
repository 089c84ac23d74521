use base64::{engine::general_purpose::STANDARD, Engine};
use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::entities::system_info::ClientSystemInfo;
use crate::errors::AppError;

/// Letters (including the Turkish set) and spaces only.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-ZğüşıöçĞÜŞİÖÇ\s]+$").unwrap());

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CareerApplicationForm {
    #[validate(
        length(min = 2, max = 50, message = "Ad 2-50 karakter arasında olmalıdır"),
        regex(path = *NAME_RE, message = "Ad sadece harflerden oluşmalıdır")
    )]
    pub name: String,

    #[validate(
        length(min = 2, max = 50, message = "Soyad 2-50 karakter arasında olmalıdır"),
        regex(path = *NAME_RE, message = "Soyad sadece harflerden oluşmalıdır")
    )]
    pub surname: String,

    #[validate(
        email(message = "Geçerli bir e-posta adresi giriniz"),
        length(min = 5, max = 100, message = "E-posta adresi 5-100 karakter arasında olmalıdır")
    )]
    pub email: String,

    #[validate(custom(function = validate_phone))]
    pub phone: String,

    #[validate(length(min = 1, message = "Lütfen bir pozisyon seçiniz"))]
    pub position: String,

    #[validate(length(
        min = 30,
        max = 1000,
        message = "Mesajınız 30-1000 karakter arasında olmalıdır"
    ))]
    pub message: String,

    #[validate(custom(function = validate_cv_list))]
    pub cv: Vec<String>,

    #[serde(rename = "recaptchaToken", default)]
    pub recaptcha_token: Option<String>,

    #[serde(rename = "systemInfo", default)]
    pub system_info: Option<ClientSystemInfo>,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !phone.chars().any(|c| c.is_ascii_digit()) {
        let mut err = ValidationError::new("phone");
        err.message = Some("Telefon numarası gereklidir".into());
        return Err(err);
    }
    Ok(())
}

fn validate_cv_list(cv: &[String]) -> Result<(), ValidationError> {
    if cv.is_empty() {
        let mut err = ValidationError::new("cv");
        err.message = Some("Gerekli".into());
        return Err(err);
    }
    for entry in cv {
        match data_url_mime(entry) {
            Some(mime) if extension_for(&mime).is_some() => {}
            Some(mime) => {
                let mut err = ValidationError::new("cv");
                err.message = Some(format!("Desteklenmeyen dosya türü: {mime}").into());
                return Err(err);
            }
            None => {
                let mut err = ValidationError::new("cv");
                err.message = Some("CV dosyası geçerli değil".into());
                return Err(err);
            }
        }
    }
    Ok(())
}

/// Keep only the digits of a phone number. Applying it twice is a no-op.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Label shown in the notification mail for a position slug. Unknown slugs
/// pass through verbatim.
pub fn position_label(value: &str) -> &str {
    match value {
        "mimar" => "Mimar",
        "ic-mimar" => "İç Mimar",
        "insaat-muhendisi" => "İnşaat Mühendisi",
        "elektrik-muhendisi" => "Elektrik Mühendisi",
        "makine-muhendisi" => "Makine Mühendisi",
        "peyzaj-mimari" => "Peyzaj Mimarı",
        "tasarimci" => "Tasarımcı",
        "tekniker" => "Tekniker",
        "teknisyen" => "Teknisyen",
        "diger" => "Diğer",
        other => other,
    }
}

#[derive(Debug, Display)]
pub enum CvParseError {
    #[display("CV dosyası geçerli değil")]
    InvalidDataUrl,

    #[display("Desteklenmeyen dosya türü: {_0}")]
    UnsupportedType(String),

    #[display("CV dosyası çözümlenemedi: {_0}")]
    DecodeFailed(String),
}

/// One uploaded CV file, decoded from its `data:<mime>;base64,<payload>`
/// transport form.
#[derive(Debug, Clone)]
pub struct CvAttachment {
    pub content: Vec<u8>,
    pub content_type: String,
    pub extension: String,
}

impl CvAttachment {
    pub fn parse(value: &str) -> Result<Self, CvParseError> {
        let rest = value.strip_prefix("data:").ok_or(CvParseError::InvalidDataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(CvParseError::InvalidDataUrl)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(CvParseError::InvalidDataUrl)?
            .trim()
            .to_ascii_lowercase();

        let extension = extension_for(&mime)
            .ok_or_else(|| CvParseError::UnsupportedType(mime.clone()))?;

        let content = STANDARD
            .decode(payload.trim())
            .map_err(|e| CvParseError::DecodeFailed(e.to_string()))?;

        Ok(CvAttachment {
            content,
            content_type: mime,
            extension: extension.to_string(),
        })
    }
}

fn data_url_mime(value: &str) -> Option<String> {
    let rest = value.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    if payload.trim().is_empty() {
        return None;
    }
    header
        .strip_suffix(";base64")
        .map(|mime| mime.trim().to_ascii_lowercase())
}

fn extension_for(mime: &str) -> Option<&'static str> {
    match mime {
        "application/pdf" => Some("pdf"),
        "application/msword" => Some("doc"),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => Some("docx"),
        "text/plain" => Some("txt"),
        _ => None,
    }
}

/// A submission that passed validation. Phone is digits-only, attachments are
/// decoded and type-checked.
#[derive(Debug, Clone)]
pub struct CareerApplication {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub message: String,
    pub cv: Vec<CvAttachment>,
}

impl TryFrom<CareerApplicationForm> for CareerApplication {
    type Error = AppError;

    fn try_from(form: CareerApplicationForm) -> Result<Self, Self::Error> {
        let mut cv = Vec::with_capacity(form.cv.len());
        for entry in &form.cv {
            let attachment = CvAttachment::parse(entry)
                .map_err(|e| AppError::field("cv", &e.to_string()))?;
            cv.push(attachment);
        }

        Ok(CareerApplication {
            name: form.name,
            surname: form.surname,
            email: form.email,
            phone: normalize_phone(&form.phone),
            position: form.position,
            message: form.message,
            cv,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CareerResponse {
    pub message: String,
    pub success: bool,
}
