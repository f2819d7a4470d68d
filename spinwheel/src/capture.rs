//! Owned-or-borrowed holders for the buffers the Monte Carlo engine works over.
//!
//! [`Capture`] is a read-only analogue of [`Cow`](std::borrow::Cow) without the [`ToOwned`]
//! requirement, so it also holds unsized targets such as slices. [`CaptureMut`] does the same
//! for buffers the engine writes into, and for the random generator it advances.

use std::borrow::{Borrow, BorrowMut};
use std::ops::{Deref, DerefMut};

#[derive(Debug, PartialEq)]
pub enum Capture<'a, W: Borrow<B>, B: ?Sized = W> {
    Owned(W),
    Borrowed(&'a B),
}

impl<W: Borrow<B> + Default, B: ?Sized> Default for Capture<'_, W, B> {
    fn default() -> Self {
        Self::Owned(W::default())
    }
}

impl<W: Borrow<B>, B: ?Sized> Deref for Capture<'_, W, B> {
    type Target = B;

    fn deref(&self) -> &Self::Target {
        match self {
            Capture::Owned(owned) => owned.borrow(),
            Capture::Borrowed(borrowed) => borrowed,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CaptureMut<'a, W: BorrowMut<B>, B: ?Sized = W> {
    Owned(W),
    Borrowed(&'a mut B),
}

impl<W: BorrowMut<B> + Default, B: ?Sized> Default for CaptureMut<'_, W, B> {
    fn default() -> Self {
        Self::Owned(W::default())
    }
}

impl<W: BorrowMut<B>, B: ?Sized> Deref for CaptureMut<'_, W, B> {
    type Target = B;

    fn deref(&self) -> &Self::Target {
        match self {
            CaptureMut::Owned(owned) => owned.borrow(),
            CaptureMut::Borrowed(borrowed) => borrowed,
        }
    }
}

impl<W: BorrowMut<B>, B: ?Sized> DerefMut for CaptureMut<'_, W, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            CaptureMut::Owned(owned) => owned.borrow_mut(),
            CaptureMut::Borrowed(borrowed) => borrowed,
        }
    }
}
