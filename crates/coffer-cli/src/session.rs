//! The interactive command session over one account container.
//!
//! A session binds exactly one [`AccountStore`] to one container file and a
//! pair of line-oriented streams. It is generic over its input and output so
//! tests can drive whole sessions from in-memory buffers, the same way the
//! binary drives it from stdin and stdout.
//!
//! Commands are single lines, matched case-insensitively. Free-text prompts
//! re-issue themselves until a non-empty line arrives; everything beyond
//! non-emptiness (duplicate names, missing accounts) is validated by the
//! store and surfaced as an error message without ending the session.

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use coffer_core::{generate_password, AccountStore, Result};

const CMD_ADD: &str = "add";
const CMD_DELETE: &str = "delete";
const CMD_MODIFY: &str = "modify";
const CMD_LIST: &str = "list accounts";
const CMD_SHOW: &str = "show details";
const CMD_GENERATE: &str = "generate password";
const CMD_CHANGE_KEY: &str = "change key";
const CMD_SAVE: &str = "save";
const CMD_QUIT: &str = "quit";

/// One run of the command loop, bound to one store and one container file.
pub struct Session<R, W> {
    input: R,
    output: W,
    container_path: PathBuf,
    store: AccountStore,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Opens the container at `container_path` and decodes it with `key`
    /// and `offset`.
    ///
    /// Loading happens here, once: a missing or unreadable file, or
    /// contents that do not decode with this key, abort construction. A
    /// session never exists half-initialized.
    pub fn new(
        input: R,
        output: W,
        container_path: impl Into<PathBuf>,
        key: &str,
        offset: u64,
    ) -> Result<Self> {
        let container_path = container_path.into();
        let mut store = AccountStore::new(offset, key)?;

        let mut file = File::open(&container_path)?;
        store.read_from(&mut file)?;

        Ok(Self {
            input,
            output,
            container_path,
            store,
        })
    }

    /// The store this session operates on.
    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// Runs the command loop until `quit` or the input stream is exhausted,
    /// then emits a farewell.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else { break };
            let command = line.to_lowercase();
            if command.is_empty() {
                continue;
            }
            if command == CMD_QUIT {
                break;
            }
            self.dispatch(&command)?;
        }

        writeln!(self.output, "Goodbye!")
    }

    fn dispatch(&mut self, command: &str) -> io::Result<()> {
        match command {
            CMD_ADD => self.add_account(),
            CMD_DELETE => self.delete_account(),
            CMD_MODIFY => self.modify_account(),
            CMD_LIST => self.list_accounts(),
            CMD_SHOW => self.show_details(),
            CMD_GENERATE => self.generate_account_password(),
            CMD_CHANGE_KEY => self.change_key(),
            CMD_SAVE => self.save(),
            _ => writeln!(self.output, "Invalid Command!\n"),
        }
    }

    fn add_account(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Please enter the account name: ")? else {
            return Ok(());
        };
        let Some(username) = self.prompt("Please enter the username: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Please enter the password: ")? else {
            return Ok(());
        };

        match self.store.add(name, username, password) {
            Ok(()) => writeln!(self.output, "The account has been added!\n"),
            Err(err) => writeln!(self.output, "Error: {}\n", err),
        }
    }

    fn delete_account(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Please enter the account name: ")? else {
            return Ok(());
        };

        if !self.store.has(&name) {
            return writeln!(self.output, "That account does not exist!\n");
        }
        match self.store.delete(&name) {
            Ok(()) => writeln!(self.output, "The account has been deleted!\n"),
            Err(err) => writeln!(self.output, "Error: {}\n", err),
        }
    }

    fn modify_account(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Please enter the account name: ")? else {
            return Ok(());
        };
        if !self.store.has(&name) {
            return writeln!(self.output, "That account does not exist!\n");
        }

        let Some(username) = self.prompt("Please enter the new username: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Please enter the new password: ")? else {
            return Ok(());
        };

        match self.store.modify(&name, username, password) {
            Ok(()) => writeln!(self.output, "The account has been modified!\n"),
            Err(err) => writeln!(self.output, "Error: {}\n", err),
        }
    }

    fn list_accounts(&mut self) -> io::Result<()> {
        for account in self.store.accounts() {
            writeln!(self.output, "{}", account.name)?;
        }
        writeln!(self.output)
    }

    fn show_details(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Please enter the account name: ")? else {
            return Ok(());
        };

        match self.store.find(&name) {
            Some(account) => {
                writeln!(self.output, "Username: {}", account.username)?;
                writeln!(self.output, "Password: {}\n", account.password)
            }
            None => writeln!(self.output, "That account does not exist!\n"),
        }
    }

    fn generate_account_password(&mut self) -> io::Result<()> {
        // Re-prompts until the requested size parses as a non-negative
        // integer.
        let length = loop {
            let Some(line) = self.prompt("Please enter the size of the password: ")? else {
                return Ok(());
            };
            match line.trim().parse::<usize>() {
                Ok(value) => break value,
                Err(_) => continue,
            }
        };

        writeln!(self.output, "{}\n", generate_password(length))
    }

    fn change_key(&mut self) -> io::Result<()> {
        let Some(new_key) = self.prompt("Please enter the new key: ")? else {
            return Ok(());
        };

        match self.store.set_key(new_key) {
            Ok(()) => writeln!(self.output, "Key changed!\n"),
            Err(err) => writeln!(self.output, "Error: {}\n", err),
        }
    }

    /// Re-encodes the store and overwrites the container file. The write is
    /// not transactional; a failure mid-write is reported, not recovered.
    fn save(&mut self) -> io::Result<()> {
        let result = File::create(&self.container_path)
            .map_err(coffer_core::CofferError::from)
            .and_then(|mut file| self.store.write_to(&mut file));

        if let Err(err) = result {
            writeln!(
                self.output,
                "Error: cannot save {}: {}\n",
                self.container_path.display(),
                err
            )?;
        }
        Ok(())
    }

    /// Writes `text` and reads lines until a non-empty one arrives.
    /// Returns `None` once the input stream is exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        loop {
            write!(self.output, "{}", text)?;
            self.output.flush()?;

            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.is_empty() => continue,
                Some(line) => return Ok(Some(line)),
            }
        }
    }

    /// Reads one line without its trailing newline. `None` means the input
    /// stream has ended.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TempContainer {
        path: PathBuf,
    }

    impl TempContainer {
        fn new(prefix: &str, contents: &str) -> Self {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("system time")
                .as_nanos();
            let filename = format!("{}_{}_{}.pwords", prefix, std::process::id(), nanos);
            let path = std::env::temp_dir().join(filename);
            fs::write(&path, contents).expect("write container");
            Self { path }
        }
    }

    impl Drop for TempContainer {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.path);
        }
    }

    fn run_script(path: &Path, key: &str, script: &str) -> (String, AccountStore) {
        let mut output = Vec::new();
        let mut session = Session::new(script.as_bytes(), &mut output, path, key, 100)
            .expect("session should open");
        session.run().expect("session should run");
        let store = session.store().clone();
        drop(session);
        (String::from_utf8(output).expect("utf-8 output"), store)
    }

    #[test]
    fn test_missing_file_aborts_construction() {
        let container = TempContainer::new("coffer_session_missing", "");
        let missing = container.path.with_extension("gone");
        let mut output = Vec::new();
        let result = Session::new("".as_bytes(), &mut output, &missing, "key", 100);
        assert!(matches!(
            result,
            Err(coffer_core::CofferError::Io { .. })
        ));
    }

    #[test]
    fn test_empty_file_loads_zero_accounts() {
        let container = TempContainer::new("coffer_session_empty", "");
        let (out, store) = run_script(&container.path, "CorrectKey", "quit\n");
        assert!(store.accounts().is_empty());
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_add_and_list() {
        let container = TempContainer::new("coffer_session_add", "");
        let script = "add\nGitHub\noctocat\nhunter2!\nlist accounts\nquit\n";
        let (out, store) = run_script(&container.path, "CorrectKey", script);

        assert!(out.contains("The account has been added!"));
        assert!(out.contains("GitHub"));
        assert_eq!(store.accounts().len(), 1);
        assert_eq!(store.find("GitHub").unwrap().username, "octocat");
    }

    #[test]
    fn test_duplicate_add_reports_error_and_continues() {
        let container = TempContainer::new("coffer_session_dup", "");
        let script = "add\nsame\nu1\np1\nadd\nsame\nu2\np2\nlist accounts\nquit\n";
        let (out, store) = run_script(&container.path, "CorrectKey", script);

        assert!(out.contains("Error:"));
        assert!(out.contains("Goodbye!"));
        assert_eq!(store.accounts().len(), 1);
        assert_eq!(store.find("same").unwrap().username, "u1");
    }

    #[test]
    fn test_delete_missing_account() {
        let container = TempContainer::new("coffer_session_del_missing", "");
        let script = "delete\nnope\nquit\n";
        let (out, _) = run_script(&container.path, "CorrectKey", script);
        assert!(out.contains("That account does not exist!"));
    }

    #[test]
    fn test_modify_flow() {
        let container = TempContainer::new("coffer_session_modify", "");
        let script = "add\nsite\nold-user\nold-pass\nmodify\nsite\nnew-user\nnew-pass\nshow details\nsite\nquit\n";
        let (out, store) = run_script(&container.path, "CorrectKey", script);

        assert!(out.contains("The account has been modified!"));
        assert!(out.contains("Username: new-user"));
        assert!(out.contains("Password: new-pass"));
        assert_eq!(store.find("site").unwrap().password, "new-pass");
    }

    #[test]
    fn test_save_persists_and_reloads() {
        let container = TempContainer::new("coffer_session_save", "");
        let script = "add\nGitHub\noctocat\nhunter2!\nsave\nquit\n";
        run_script(&container.path, "CorrectKey", script);

        let contents = fs::read_to_string(&container.path).expect("read container");
        assert!(!contents.is_empty());
        assert!(!contents.contains("GitHub"));

        let (_, store) = run_script(&container.path, "CorrectKey", "quit\n");
        assert_eq!(store.accounts().len(), 1);
        assert_eq!(store.find("GitHub").unwrap().password, "hunter2!");
    }

    #[test]
    fn test_wrong_key_aborts_construction() {
        let container = TempContainer::new("coffer_session_wrong_key", "");
        let script = "add\nGitHub\noctocat\nhunter2!\nsave\nquit\n";
        run_script(&container.path, "CorrectKey", script);

        let mut output = Vec::new();
        let result = Session::new("".as_bytes(), &mut output, &container.path, "Key", 100);
        assert!(matches!(
            result,
            Err(coffer_core::CofferError::Decode(_))
        ));
    }

    #[test]
    fn test_prompts_reissue_until_non_empty() {
        let container = TempContainer::new("coffer_session_reprompt", "");
        let script = "add\n\n\nGitHub\noctocat\nhunter2!\nquit\n";
        let (out, store) = run_script(&container.path, "CorrectKey", script);

        assert_eq!(
            out.matches("Please enter the account name: ").count(),
            3
        );
        assert_eq!(store.accounts().len(), 1);
    }

    #[test]
    fn test_generate_password_reprompts_on_bad_length() {
        let container = TempContainer::new("coffer_session_generate", "");
        let script = "generate password\nlots\n-3\n12\nquit\n";
        let (out, _) = run_script(&container.path, "CorrectKey", script);

        assert_eq!(
            out.matches("Please enter the size of the password: ").count(),
            3
        );

        // Prompts carry no trailing newline, so the generated password ends
        // the line that holds the prompt text. Passwords never contain a
        // space, so splitting on ": " is unambiguous.
        let line = out
            .lines()
            .find(|line| line.contains("Please enter the size of the password: "))
            .expect("prompt line");
        let password = line.rsplit(": ").next().expect("password suffix");
        assert_eq!(password.len(), 12);
        assert!(password.chars().all(|c| ('!'..='~').contains(&c)));
    }

    #[test]
    fn test_change_key_reencrypts_on_save() {
        let container = TempContainer::new("coffer_session_change_key", "");
        let script = "add\nGitHub\noctocat\nhunter2!\nchange key\nFreshKey\nsave\nquit\n";
        let (out, _) = run_script(&container.path, "CorrectKey", script);
        assert!(out.contains("Key changed!"));

        let (_, store) = run_script(&container.path, "FreshKey", "quit\n");
        assert_eq!(store.accounts().len(), 1);
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        let container = TempContainer::new("coffer_session_case", "");
        let script = "ADD\nGitHub\noctocat\nhunter2!\nLIST ACCOUNTS\nquit\n";
        let (out, store) = run_script(&container.path, "CorrectKey", script);

        assert!(out.contains("The account has been added!"));
        assert_eq!(store.accounts().len(), 1);
    }

    #[test]
    fn test_unknown_command() {
        let container = TempContainer::new("coffer_session_unknown", "");
        let (out, _) = run_script(&container.path, "CorrectKey", "frobnicate\nquit\n");
        assert!(out.contains("Invalid Command!"));
    }

    #[test]
    fn test_exhausted_input_ends_loop() {
        let container = TempContainer::new("coffer_session_eof", "");
        let (out, _) = run_script(&container.path, "CorrectKey", "list accounts\n");
        assert!(out.contains("Goodbye!"));
    }
}
