//! # Message Service
//!
//! 通知メールの件名・本文・宛先の組み立て

/// メッセージ組み立てサービス
pub struct MessageService;

impl MessageService {
    /// 件名を組み立てる
    ///
    /// カメラ名があれば `"<件名> - <カメラ名>"` とする。
    /// 複数のカメラが同じメールボックスに通知する場合の区別に使う。
    pub fn compose_subject(subject: &str, camera_name: Option<&str>) -> String {
        match camera_name {
            Some(camera) => format!("{} - {}", subject, camera),
            None => subject.to_string(),
        }
    }

    /// 本文を組み立てる
    ///
    /// リンクがある場合のみ、空行の後にファイル名とリンクを追加する
    ///
    /// # 例
    ///
    /// ```
    /// use motion_uploader::domain::services::message::MessageService;
    ///
    /// let body = MessageService::compose_body(
    ///     "Motion detected",
    ///     "vid001.avi",
    ///     Some("https://drive.google.com/file/d/abc/view"),
    /// );
    /// assert_eq!(
    ///     body,
    ///     "Motion detected\n\nvid001.avi\nhttps://drive.google.com/file/d/abc/view"
    /// );
    ///
    /// let body = MessageService::compose_body("Motion detected", "vid001.avi", None);
    /// assert_eq!(body, "Motion detected");
    /// ```
    pub fn compose_body(message: &str, display_name: &str, link: Option<&str>) -> String {
        match link.filter(|l| !l.is_empty()) {
            Some(link) => format!("{}\n\n{}\n{}", message, display_name, link),
            None => message.to_string(),
        }
    }

    /// カンマ区切りの宛先を展開する
    ///
    /// 前後の空白を除去し、空の要素と重複は取り除く（順序は維持）
    pub fn parse_recipients(raw: &str) -> Vec<String> {
        let mut recipients: Vec<String> = Vec::new();
        for address in raw.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            if !recipients.iter().any(|r| r == address) {
                recipients.push(address.to_string());
            }
        }
        recipients
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_subject_with_camera() {
        let subject = MessageService::compose_subject("Motion detected", Some("garden"));
        assert_eq!(subject, "Motion detected - garden");
    }

    #[test]
    fn test_compose_subject_without_camera() {
        let subject = MessageService::compose_subject("Motion detected", None);
        assert_eq!(subject, "Motion detected");
    }

    #[test]
    fn test_compose_body_empty_link_is_omitted() {
        let body = MessageService::compose_body("Hello", "vid.avi", Some(""));
        assert_eq!(body, "Hello");
    }

    #[test]
    fn test_parse_recipients_single() {
        assert_eq!(
            MessageService::parse_recipients("a@x.com"),
            vec!["a@x.com".to_string()]
        );
    }

    #[test]
    fn test_parse_recipients_trims_and_skips_empty() {
        assert_eq!(
            MessageService::parse_recipients(" a@x.com, b@x.com,,"),
            vec!["a@x.com".to_string(), "b@x.com".to_string()]
        );
    }

    #[test]
    fn test_parse_recipients_removes_duplicates() {
        assert_eq!(
            MessageService::parse_recipients("a@x.com,b@x.com,a@x.com"),
            vec!["a@x.com".to_string(), "b@x.com".to_string()]
        );
    }

    #[test]
    fn test_parse_recipients_empty() {
        assert!(MessageService::parse_recipients("  ").is_empty());
    }
}
