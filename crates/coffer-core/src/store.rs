//! The account container: uniquely named credential records plus the
//! fixed-format wire (de)serialization that runs through [`Cipher`].
//!
//! On the wire, each account is the line `name TAB username TAB password`,
//! records are joined by newlines with no trailing newline, and the whole
//! blob is passed through the cipher. An empty store serializes to an empty
//! string, and an empty file is a valid zero-account container.

use serde::{Deserialize, Serialize};

use crate::cipher::Cipher;
use crate::error::{CofferError, Result};

/// Number of tab-separated fields in one serialized account line.
const FIELDS_PER_ACCOUNT: usize = 3;

/// One stored credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// What site or service the credentials belong to. Unique within a
    /// store, immutable once added.
    pub name: String,

    /// The username for the account.
    pub username: String,

    /// The password for the account.
    pub password: String,
}

/// Ordered collection of uniquely named accounts with keyed
/// (de)serialization.
///
/// The store is the sole owner of its records: callers get shared views or
/// clones, and every mutation goes through [`add`](AccountStore::add),
/// [`delete`](AccountStore::delete), or [`modify`](AccountStore::modify),
/// which is what keeps the name-uniqueness invariant enforceable.
///
/// Decoding happens once, at [`deserialize`](AccountStore::deserialize)
/// time. Changing the key or offset afterwards affects only future
/// [`serialize`](AccountStore::serialize) calls and never rewrites records
/// already in memory.
#[derive(Debug, Clone)]
pub struct AccountStore {
    cipher: Cipher,
    accounts: Vec<Account>,
}

impl AccountStore {
    /// Creates an empty store.
    ///
    /// # Errors
    ///
    /// Returns `CofferError::InvalidInput` if `offset` is below
    /// [`MIN_OFFSET`](crate::cipher::MIN_OFFSET) or `key` is empty.
    pub fn new(offset: u64, key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            cipher: Cipher::new(offset, key)?,
            accounts: Vec::new(),
        })
    }

    /// Read-only view of all accounts, in insertion order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Returns the current cipher key.
    pub fn key(&self) -> &str {
        self.cipher.key()
    }

    /// Replaces the cipher key. Existing records are untouched.
    pub fn set_key(&mut self, new_key: impl Into<String>) -> Result<()> {
        self.cipher.set_key(new_key)
    }

    /// Replaces the cipher offset. Existing records are untouched.
    pub fn set_offset(&mut self, offset: u64) -> Result<()> {
        self.cipher.set_offset(offset)
    }

    /// Whether an account with exactly this name exists.
    pub fn has(&self, name: &str) -> bool {
        self.accounts.iter().any(|account| account.name == name)
    }

    /// Looks up an account by exact name.
    pub fn find(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.name == name)
    }

    /// Appends a new account at the end of the sequence.
    ///
    /// # Errors
    ///
    /// Returns `CofferError::InvalidInput` if an account with this name
    /// already exists, or if any field is empty.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        let username = username.into();
        let password = password.into();

        if self.has(&name) {
            return Err(CofferError::InvalidInput(format!(
                "an account named \"{}\" already exists",
                name
            )));
        }
        if name.is_empty() || username.is_empty() || password.is_empty() {
            return Err(CofferError::InvalidInput(
                "account name, username, and password must not be empty".to_string(),
            ));
        }

        self.accounts.push(Account {
            name,
            username,
            password,
        });
        Ok(())
    }

    /// Removes the account with this name, preserving the relative order of
    /// the rest.
    ///
    /// # Errors
    ///
    /// Returns `CofferError::InvalidInput` if no account has this name.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let position = self
            .accounts
            .iter()
            .position(|account| account.name == name)
            .ok_or_else(|| {
                CofferError::InvalidInput(format!("no account named \"{}\"", name))
            })?;
        self.accounts.remove(position);
        Ok(())
    }

    /// Updates the username and password of the named account in place.
    /// The name itself is immutable.
    ///
    /// # Errors
    ///
    /// Returns `CofferError::InvalidInput` if no account has this name, or
    /// if `username` or `password` is empty.
    pub fn modify(
        &mut self,
        name: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<()> {
        let username = username.into();
        let password = password.into();

        if username.is_empty() || password.is_empty() {
            return Err(CofferError::InvalidInput(
                "username and password must not be empty".to_string(),
            ));
        }

        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.name == name)
            .ok_or_else(|| {
                CofferError::InvalidInput(format!("no account named \"{}\"", name))
            })?;
        account.username = username;
        account.password = password;
        Ok(())
    }

    /// Encodes the whole store into wire text.
    pub fn serialize(&self) -> String {
        let mut plaintext = String::new();
        for account in &self.accounts {
            plaintext.push_str(&account.name);
            plaintext.push('\t');
            plaintext.push_str(&account.username);
            plaintext.push('\t');
            plaintext.push_str(&account.password);
            plaintext.push('\n');
        }
        // The last record carries no trailing newline.
        plaintext.pop();

        self.cipher.encode(&plaintext)
    }

    /// Decodes wire text and appends one account per line, in file order.
    ///
    /// This is the only path besides [`add`](AccountStore::add) by which
    /// records enter a store. Lines are taken as-is from the file: field
    /// validation and duplicate detection apply to `add`, not to data that
    /// was already persisted.
    ///
    /// # Errors
    ///
    /// Returns `CofferError::Decode` if the wire text does not decode with
    /// the current key and offset, or if a decoded line has fewer than
    /// three tab-separated fields.
    pub fn deserialize(&mut self, wiretext: &str) -> Result<()> {
        let plaintext = self.cipher.decode(wiretext)?;
        if plaintext.is_empty() {
            return Ok(());
        }

        for line in plaintext.split('\n') {
            self.push_line(line)?;
        }
        Ok(())
    }

    /// Reads an entire wire-format byte stream into the store.
    pub fn read_from(&mut self, reader: &mut impl std::io::Read) -> Result<()> {
        let mut wiretext = String::new();
        reader.read_to_string(&mut wiretext)?;
        self.deserialize(&wiretext)
    }

    /// Encodes the store and writes the wire text to `writer`.
    pub fn write_to(&self, writer: &mut impl std::io::Write) -> Result<()> {
        writer.write_all(self.serialize().as_bytes())?;
        Ok(())
    }

    fn push_line(&mut self, line: &str) -> Result<()> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < FIELDS_PER_ACCOUNT {
            return Err(CofferError::Decode(format!(
                "account line has {} field(s), expected {}",
                fields.len(),
                FIELDS_PER_ACCOUNT
            )));
        }

        self.accounts.push(Account {
            name: fields[0].to_string(),
            username: fields[1].to_string(),
            password: fields[2].to_string(),
        });
        Ok(())
    }
}
