// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Telling each giver who they drew.
//!
//! Nothing here talks SMTP. Notices are either printed or written as message
//! files for an external mail transport to pick up.

use std::fs::create_dir_all;
use std::fs::write;
use std::io::Write;
use std::io::stdout;
use std::path::PathBuf;

use secretsanta_core::error::Fallible;
use secretsanta_core::types::pairing::Pairing;
use secretsanta_core::types::participant::Participant;
use secretsanta_core::types::run_code::RunCode;

use crate::config::Group;
use crate::config::Sender;

/// A message for one giver.
#[derive(Debug, PartialEq)]
pub struct Notice {
    pub giver: String,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl Notice {
    pub fn compose(sender: &Sender, giver: &Participant, recipient: &str, code: &RunCode) -> Self {
        Self {
            giver: giver.name().to_string(),
            from: format!("{} <{}>", sender.name, sender.address),
            to: giver.email().to_vec(),
            subject: sender.subject.replace("{code}", code.as_str()),
            body: format!(
                "{}:\n\nYour secret santa this year is: {}\n",
                giver.name(),
                recipient.to_uppercase()
            ),
        }
    }

    /// The notice as an RFC 5322 style message.
    pub fn to_message(&self) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\n\
             Content-Type: text/plain; charset=utf-8\r\n\r\n{}",
            self.from,
            self.to.join(", "),
            self.subject,
            self.body.replace('\n', "\r\n")
        )
    }
}

pub trait Notifier {
    fn deliver(&mut self, notice: &Notice) -> Fallible<()>;
}

/// Prints notices.
pub struct Console<W: Write> {
    out: W,
}

impl Console<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: stdout() }
    }
}

impl<W: Write> Console<W> {
    #[cfg(test)]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for Console<W> {
    fn deliver(&mut self, notice: &Notice) -> Fallible<()> {
        writeln!(self.out, "To: {}", notice.to.join(", "))?;
        writeln!(self.out, "Subject: {}", notice.subject)?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", notice.body)?;
        Ok(())
    }
}

/// Writes one `.eml` file per giver into a directory named after the code.
pub struct Outbox {
    dir: PathBuf,
}

impl Outbox {
    pub fn create(root: PathBuf, code: &RunCode) -> Fallible<Self> {
        let dir = root.join(file_stem(code.as_str()));
        create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl Notifier for Outbox {
    fn deliver(&mut self, notice: &Notice) -> Fallible<()> {
        let path = self.dir.join(format!("{}.eml", file_stem(&notice.giver)));
        write(&path, notice.to_message())?;
        log::info!("Wrote notice for {} to {}", notice.giver, path.display());
        Ok(())
    }
}

fn file_name_safe(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// A file name stem for `s`. Names that had to be altered get a hash of the
/// original appended, so two different names never share a file.
fn file_stem(s: &str) -> String {
    let safe = file_name_safe(s);
    if safe == s {
        return safe;
    }
    let hash = blake3::hash(s.as_bytes()).to_hex();
    format!("{safe}-{}", &hash.as_str()[..8])
}

/// Send every giver in `pairings` their notice. Givers who are no longer in
/// the group are skipped.
pub fn notify_all(
    notifier: &mut dyn Notifier,
    sender: &Sender,
    group: &Group,
    pairings: &[Pairing],
    code: &RunCode,
) -> Fallible<usize> {
    let mut delivered = 0;
    for pairing in pairings {
        let Some(giver) = group.person(&pairing.giver) else {
            log::warn!(
                "'{}' is not in group '{}' any more; not notified",
                pairing.giver,
                group.name
            );
            continue;
        };
        let notice = Notice::compose(sender, giver, &pairing.recipient, code);
        notifier.deliver(&notice)?;
        delivered += 1;
    }
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use std::fs::read_dir;
    use std::fs::read_to_string;

    use super::*;
    use crate::helper::create_tmp_directory;

    fn sender() -> Sender {
        Sender {
            address: "santa@example.com".to_string(),
            name: "Santa".to_string(),
            subject: "Secret Santa (#{code})".to_string(),
        }
    }

    fn person(name: &str, email: &[&str]) -> Participant {
        let email = email.iter().map(|e| e.to_string()).collect();
        Participant::new(name, email, Vec::new())
    }

    fn group() -> Group {
        Group {
            name: "family".to_string(),
            people: vec![
                person("juli", &["juli@example.com", "juli@work.example.com"]),
                person("marce", &["marce@example.com"]),
            ],
        }
    }

    #[test]
    fn test_compose() -> Fallible<()> {
        let group = group();
        let code = RunCode::new("1a2b")?;
        let notice = Notice::compose(&sender(), &group.people[0], "marce", &code);
        assert_eq!(notice.from, "Santa <santa@example.com>");
        assert_eq!(notice.to, vec!["juli@example.com", "juli@work.example.com"]);
        assert_eq!(notice.subject, "Secret Santa (#1a2b)");
        assert_eq!(notice.body, "juli:\n\nYour secret santa this year is: MARCE\n");
        Ok(())
    }

    #[test]
    fn test_console() -> Fallible<()> {
        let mut console = Console::new(Vec::new());
        let pairings = vec![
            Pairing::new("juli", "marce"),
            Pairing::new("marce", "juli"),
        ];
        let code = RunCode::new("c0de")?;
        let delivered = notify_all(&mut console, &sender(), &group(), &pairings, &code)?;
        assert_eq!(delivered, 2);
        let output = String::from_utf8(console.into_inner())?;
        assert!(output.contains("To: marce@example.com\nSubject: Secret Santa (#c0de)"));
        assert!(output.contains("Your secret santa this year is: JULI"));
        Ok(())
    }

    #[test]
    fn test_outbox() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let code = RunCode::new("c0de")?;
        let mut outbox = Outbox::create(root.clone(), &code)?;
        let pairings = vec![
            Pairing::new("juli", "marce"),
            Pairing::new("gone", "juli"),
        ];
        let delivered = notify_all(&mut outbox, &sender(), &group(), &pairings, &code)?;
        assert_eq!(delivered, 1);
        let message = read_to_string(root.join("c0de").join("juli.eml"))?;
        assert!(message.starts_with("From: Santa <santa@example.com>\r\n"));
        assert!(message.contains("To: juli@example.com, juli@work.example.com\r\n"));
        assert!(message.ends_with("Your secret santa this year is: MARCE\r\n"));
        assert!(!root.join("c0de").join("gone.eml").exists());
        Ok(())
    }

    /// Names that sanitize to the same string still get a file each.
    #[test]
    fn test_outbox_keeps_similar_names_apart() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let code = RunCode::new("c0de")?;
        let group = Group {
            name: "family".to_string(),
            people: vec![
                person("jo ann", &["jo.a@example.com"]),
                person("jo.ann", &["jo.b@example.com"]),
                person("jo_ann", &["jo.c@example.com"]),
            ],
        };
        let pairings = vec![
            Pairing::new("jo ann", "jo.ann"),
            Pairing::new("jo.ann", "jo_ann"),
            Pairing::new("jo_ann", "jo ann"),
        ];
        let mut outbox = Outbox::create(root.clone(), &code)?;
        let delivered = notify_all(&mut outbox, &sender(), &group, &pairings, &code)?;
        assert_eq!(delivered, 3);

        let mut messages = Vec::new();
        for entry in read_dir(root.join("c0de"))? {
            messages.push(read_to_string(entry?.path())?);
        }
        assert_eq!(messages.len(), 3);
        for (address, recipient) in [
            ("jo.a@example.com", "JO.ANN"),
            ("jo.b@example.com", "JO_ANN"),
            ("jo.c@example.com", "JO ANN"),
        ] {
            let message = messages
                .iter()
                .find(|m| m.contains(&format!("To: {address}\r\n")))
                .unwrap();
            assert!(message.contains(&format!("is: {recipient}\r\n")));
        }
        assert!(root.join("c0de").join("jo_ann.eml").exists());
        Ok(())
    }

    #[test]
    fn test_file_name_safe() {
        assert_eq!(file_name_safe("14:30"), "14_30");
        assert_eq!(file_name_safe("../x"), "___x");
        assert_eq!(file_name_safe("María-José"), "María-José");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("juli"), "juli");
        assert_ne!(file_stem("jo ann"), file_stem("jo.ann"));
        assert!(file_stem("jo ann").starts_with("jo_ann-"));
        assert_eq!(file_stem("jo ann").len(), "jo_ann-".len() + 8);
    }
}
