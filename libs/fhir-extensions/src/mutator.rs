//! Extension mutation: set, add, clear
//!
//! `set` and `add` take an [`ElementTarget`] so they can also attach an
//! extension to an element that does not exist yet, such as the `_birthDate`
//! shadow element of a primitive field. The target is resolved before any
//! change is made, so a failed call leaves everything untouched.

use crate::error::{Error, Result};
use ferrum_models::common::{Extension, HasExtensionsMut};

/// Where a mutation should land
pub enum ElementTarget<'a, E: 'a> {
    /// The element exists
    Existing(&'a mut E),
    /// The element is absent; the factory creates it, makes it reachable from
    /// the host structure, and hands it back
    Create(Box<dyn FnOnce() -> Option<&'a mut E> + 'a>),
    /// The element is absent and cannot be created
    Missing,
}

impl<'a, E: 'a> ElementTarget<'a, E> {
    /// Target an absent element that `factory` creates and wires into its host.
    pub fn create<F>(factory: F) -> Self
    where
        F: FnOnce() -> Option<&'a mut E> + 'a,
    {
        Self::Create(Box::new(factory))
    }

    /// Target the element stored in `slot`, creating it with `factory` only
    /// if the slot is empty.
    pub fn from_slot<F>(slot: &'a mut Option<E>, factory: F) -> Self
    where
        F: FnOnce() -> Option<E> + 'a,
    {
        if slot.is_none() {
            return Self::create(move || {
                let element = factory()?;
                Some(slot.insert(element))
            });
        }

        match slot.as_mut() {
            Some(element) => Self::Existing(element),
            None => Self::Missing,
        }
    }

    /// Like [`ElementTarget::from_slot`], filling an empty slot with `E::default()`
    pub fn from_slot_or_default(slot: &'a mut Option<E>) -> Self
    where
        E: Default,
    {
        Self::from_slot(slot, || Some(E::default()))
    }

    fn resolve(self, url: &str) -> Result<&'a mut E> {
        match self {
            Self::Existing(element) => Ok(element),
            Self::Create(factory) => match factory() {
                Some(element) => {
                    tracing::debug!(url = %url, "Created element to hold extension");
                    Ok(element)
                }
                None => {
                    tracing::warn!(url = %url, "Element factory returned no element");
                    Err(Error::ElementCreation {
                        url: url.to_string(),
                    })
                }
            },
            Self::Missing => {
                tracing::warn!(url = %url, "No element to attach extension to");
                Err(Error::MissingTarget {
                    url: url.to_string(),
                })
            }
        }
    }
}

/// Conversion into an [`ElementTarget`]
///
/// Implemented for `&mut E` (element exists), `Option<&mut E>` (`None` is
/// [`ElementTarget::Missing`]) and `ElementTarget` itself.
pub trait IntoElementTarget<'a> {
    type Element: HasExtensionsMut + 'a;

    fn into_target(self) -> ElementTarget<'a, Self::Element>;
}

impl<'a, E: HasExtensionsMut + 'a> IntoElementTarget<'a> for &'a mut E {
    type Element = E;

    fn into_target(self) -> ElementTarget<'a, E> {
        ElementTarget::Existing(self)
    }
}

impl<'a, E: HasExtensionsMut + 'a> IntoElementTarget<'a> for Option<&'a mut E> {
    type Element = E;

    fn into_target(self) -> ElementTarget<'a, E> {
        match self {
            Some(element) => ElementTarget::Existing(element),
            None => ElementTarget::Missing,
        }
    }
}

impl<'a, E: HasExtensionsMut + 'a> IntoElementTarget<'a> for ElementTarget<'a, E> {
    type Element = E;

    fn into_target(self) -> ElementTarget<'a, E> {
        self
    }
}

/// Set an extension, replacing any existing extensions with the same url.
///
/// The new extension takes the position of the first existing match and any
/// later matches are removed. With no match it is appended.
pub fn set_extension<'a, T>(element: T, extension: Extension) -> Result<()>
where
    T: IntoElementTarget<'a>,
{
    let element = element.into_target().resolve(&extension.url)?;
    let extensions = element.extension_mut().get_or_insert_with(Vec::new);

    match extensions.iter().position(|ext| ext.url == extension.url) {
        Some(first) => {
            let before = extensions.len();
            let mut index = 0;
            extensions.retain(|ext| {
                let keep = index <= first || ext.url != extension.url;
                index += 1;
                keep
            });

            let removed = before - extensions.len();
            if removed > 0 {
                tracing::debug!(
                    url = %extension.url,
                    removed,
                    "Collapsed duplicate extensions"
                );
            }

            extensions[first] = extension;
        }
        None => extensions.push(extension),
    }

    Ok(())
}

/// Append an extension, keeping any existing extensions with the same url.
pub fn add_extension<'a, T>(element: T, extension: Extension) -> Result<()>
where
    T: IntoElementTarget<'a>,
{
    let element = element.into_target().resolve(&extension.url)?;
    element
        .extension_mut()
        .get_or_insert_with(Vec::new)
        .push(extension);
    Ok(())
}

/// Remove every extension with the given url.
///
/// Drops the `extension` array entirely once it is empty.
pub fn clear_extension<E>(element: &mut E, url: &str)
where
    E: HasExtensionsMut + ?Sized,
{
    remove_extension_where(element, |ext| ext.url == url);
}

/// [`clear_extension`] on an element that may be absent (no-op when `None`)
pub fn clear_extension_in<E>(element: Option<&mut E>, url: &str)
where
    E: HasExtensionsMut + ?Sized,
{
    if let Some(element) = element {
        clear_extension(element, url);
    }
}

/// Remove every extension matching `predicate`, returning how many were removed.
///
/// An `extension` array left empty is removed.
pub fn remove_extension_where<E, P>(element: &mut E, mut predicate: P) -> usize
where
    E: HasExtensionsMut + ?Sized,
    P: FnMut(&Extension) -> bool,
{
    let slot = element.extension_mut();
    let Some(extensions) = slot.as_mut() else {
        return 0;
    };

    let before = extensions.len();
    extensions.retain(|ext| !predicate(ext));
    let removed = before - extensions.len();

    if extensions.is_empty() {
        *slot = None;
    }
    removed
}
