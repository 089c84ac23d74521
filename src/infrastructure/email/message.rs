use crate::entities::application::{position_label, CareerApplication};
use crate::entities::system_info::SystemInfo;

use super::{CareerEmail, EmailAttachment};

impl CareerEmail {
    /// Build the notification for one submission. Every metadata line is
    /// rendered even when its value is a sentinel: reviewers rely on the
    /// line set never changing.
    pub fn compose(
        application: &CareerApplication,
        info: &SystemInfo,
        recipient: &str,
    ) -> Self {
        let label = position_label(&application.position);

        let subject = format!(
            "🎓 Yeni başvuru {} - {} {}",
            label, application.name, application.surname
        );

        let html_body = format!(
            "<h2>Form Bilgileri</h2>\n\
             <p><strong>Ad:</strong> {name}</p>\n\
             <p><strong>Soyad:</strong> {surname}</p>\n\
             <p><strong>Telefon:</strong> {phone}</p>\n\
             <p><strong>E-posta:</strong> {email}</p>\n\
             <p><strong>Pozisyon:</strong> {position}</p>\n\
             <p><strong>Mesaj:</strong> {message}</p>\n\
             <br>\n\
             <h3>Sistem Log Bilgileri</h3>\n\
             <p><strong>Tarayıcı:</strong> {browser} {browser_version}</p>\n\
             <p><strong>İşletim Sistemi:</strong> {os} {os_version}</p>\n\
             <p><strong>Cihaz:</strong> {device}</p>\n\
             <p><strong>Ekran Çözünürlüğü:</strong> {screen_resolution}</p>\n\
             <p><strong>Dil:</strong> {language}</p>\n\
             <p><strong>IP Adresi:</strong> {ip_address}</p>\n\
             <p><strong>ISP:</strong> {isp}</p>\n\
             <p><strong>ASN:</strong> {asn}</p>\n\
             <p><strong>Zaman Dilimi:</strong> {time_zone}</p>\n\
             <p><strong>Yerel Tarih/Saat:</strong> {local_date_time}</p>\n\
             <p><strong>Referrer:</strong> {referrer}</p>\n\
             <p><strong>Mevcut URL:</strong> {current_url}</p>\n\
             <p><strong>User-Agent:</strong> {user_agent}</p>\n\
             <p><strong>Sunucu Zamanı:</strong> {received_at}</p>",
            name = application.name,
            surname = application.surname,
            phone = application.phone,
            email = application.email,
            position = label,
            message = application.message,
            browser = info.browser,
            browser_version = info.browser_version,
            os = info.os,
            os_version = info.os_version,
            device = info.device,
            screen_resolution = info.screen_resolution,
            language = info.language,
            ip_address = info.ip_address,
            isp = info.isp,
            asn = info.asn,
            time_zone = info.time_zone,
            local_date_time = info.local_date_time,
            referrer = info.referrer,
            current_url = info.current_url,
            user_agent = info.user_agent,
            received_at = info.received_at,
        );

        let attachments = application
            .cv
            .iter()
            .enumerate()
            .map(|(index, file)| EmailAttachment {
                filename: format!(
                    "CV_{}_{}_{}.{}",
                    application.name,
                    application.surname,
                    index + 1,
                    file.extension
                ),
                content: file.content.clone(),
                content_type: file.content_type.clone(),
            })
            .collect();

        CareerEmail {
            recipient: recipient.to_string(),
            subject,
            html_body,
            attachments,
        }
    }
}
