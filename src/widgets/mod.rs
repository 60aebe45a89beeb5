//! Built-in widgets: thin compositions over [`ElementMut`](crate::element::ElementMut).
//!
//! Each widget wraps the handle of the element it constructs and derefs to
//! it, so every element setter (`classes`, `attr`, `on`, `within`, ...) is
//! available on the widget as well.

macro_rules! element_widget {
    ($name:ident) => {
        impl<'f> std::ops::Deref for $name<'f> {
            type Target = $crate::element::ElementMut<'f>;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl<'f> std::ops::DerefMut for $name<'f> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.inner
            }
        }

        impl<'f> $name<'f> {
            /// The underlying element handle.
            pub fn into_inner(self) -> $crate::element::ElementMut<'f> {
                self.inner
            }
        }
    };
}

pub mod button;
pub mod data;
pub mod html;
pub mod input;
pub mod label;
pub mod layout;
pub mod markdown;
pub mod spinner;
pub mod toast;

pub use button::Button;
pub use data::{show, Dict};
pub use html::Html;
pub use input::Input;
pub use label::Label;
pub use layout::{Col, ColOptions, Row, RowOptions};
pub use markdown::Markdown;
pub use spinner::{Spinner, SpinnerKind};
pub use toast::Toast;
