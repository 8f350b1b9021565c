#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Author;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Normal,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub path: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Message {
    pub author: Author,
    pub text: String,
    mtype: MessageType,
    pub attachment: Option<Attachment>,
    pub generated_image: Option<String>,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            author: author.clone(),
            text: text.to_string().replace('\t', "  "),
            mtype: MessageType::Normal,
            attachment: None,
            generated_image: None,
        };
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            author: author.clone(),
            text: text.to_string().replace('\t', "  "),
            mtype,
            attachment: None,
            generated_image: None,
        };
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn append(&mut self, text: &str) {
        self.text += &text.replace('\t', "  ");
    }

    /// Transcript text plus marker lines for the attached reference image and
    /// the generated design preview.
    pub fn display_text(&self) -> String {
        let mut text = self.text.to_string();
        if let Some(attachment) = &self.attachment {
            text += &format!("\n[imagen adjunta: {}]", attachment.filename);
        }
        if let Some(url) = &self.generated_image {
            text += &format!("\n[vista previa del diseño: {url}]");
        }

        return text;
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.display_text().split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_words: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                let word_width = word.chars().count();
                if word_width + char_count + 1 > line_max_width && !current_words.is_empty() {
                    lines.push(current_words.join(" ").trim_end().to_string());
                    current_words = vec![word];
                    char_count = word_width + 1;
                } else {
                    current_words.push(word);
                    char_count += word_width + 1;
                }
            }
            if !current_words.is_empty() {
                lines.push(current_words.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
