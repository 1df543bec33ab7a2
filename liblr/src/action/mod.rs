//! Command verbs and their arguments.
//!
//! An [`Action`] is one of a closed set of verbs, each with a canonical and
//! a short alias. Verbs are matched exactly (case-sensitive). The argument
//! of `rm-tags` is parsed into a [`TagSelection`].

use crate::error::{LrError, Result};
use std::fmt;
use std::str::FromStr;


/// A command verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// List registry repositories (`ls-images`, `li`)
    ListImages,
    /// List tags of an image (`ls-tags`, `lt`)
    ListTags,
    /// Remove every tag of an image (`rm-image`, `ri`)
    DeleteImage,
    /// Remove the listed tags of an image (`rm-tags`, `rt`)
    DeleteTags,
    /// Print usage (`help`)
    Help,
}

impl Action {
    /// All actions, in the order they appear in usage text.
    pub const ALL: [Action; 5] = [
        Action::ListImages,
        Action::ListTags,
        Action::DeleteImage,
        Action::DeleteTags,
        Action::Help,
    ];

    pub fn canonical(&self) -> &'static str {
        match self {
            Self::ListImages => "ls-images",
            Self::ListTags => "ls-tags",
            Self::DeleteImage => "rm-image",
            Self::DeleteTags => "rm-tags",
            Self::Help => "help",
        }
    }

    /// Short alias; `help` has none and returns its canonical name.
    pub fn alias(&self) -> &'static str {
        match self {
            Self::ListImages => "li",
            Self::ListTags => "lt",
            Self::DeleteImage => "ri",
            Self::DeleteTags => "rt",
            Self::Help => "help",
        }
    }
}

impl FromStr for Action {
    type Err = LrError;

    /// Parses a verb or its alias.
    ///
    /// # Examples
    ///
    /// ```
    /// use liblr::action::Action;
    ///
    /// assert_eq!("li".parse::<Action>().unwrap(), Action::ListImages);
    /// assert_eq!("rm-tags".parse::<Action>().unwrap(), Action::DeleteTags);
    /// assert!("LS-IMAGES".parse::<Action>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.canonical() == s || action.alias() == s)
            .ok_or_else(|| LrError::validation(format!("Unknown action '{}'", s)))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// An image plus the tags selected for deletion, parsed from `image:tag1,tag2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSelection {
    /// Repository name
    pub image: String,
    /// Tags in the order given
    pub tags: Vec<String>,
}

impl TagSelection {
    /// Creates a selection from an image and tag list.
    pub fn new(image: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            image: image.into(),
            tags,
        }
    }

    /// Parses `image:tag1,tag2,...`.
    ///
    /// The argument is split into at most two parts on the first `:`, so any
    /// further colons stay in the tag part. Empty tag segments are skipped;
    /// `image:` selects no tags at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use liblr::action::TagSelection;
    ///
    /// let sel = TagSelection::parse("myimage:tagA,tagB").unwrap();
    /// assert_eq!(sel.image, "myimage");
    /// assert_eq!(sel.tags, vec!["tagA", "tagB"]);
    ///
    /// assert!(TagSelection::parse("myimage:").unwrap().tags.is_empty());
    /// assert!(TagSelection::parse("myimage").is_err());
    /// ```
    pub fn parse(argument: &str) -> Result<Self> {
        let (image, tags) = argument.split_once(':').ok_or_else(|| {
            LrError::validation(format!(
                "Invalid tag selection '{}': expected image:tag1,tag2",
                argument
            ))
        })?;

        let image = image.trim();
        if image.is_empty() {
            return Err(LrError::validation(format!(
                "Invalid tag selection '{}': image name is empty",
                argument
            )));
        }

        let tags = tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect();

        Ok(Self::new(image, tags))
    }
}

impl fmt::Display for TagSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.image, self.tags.join(","))
    }
}
