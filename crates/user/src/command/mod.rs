use std::ops::Deref;

use crate::TokenSigner;

mod avatar;
mod login;
mod password;
mod register;
mod staff;
mod subscribe;

pub use login::{LoginInput, Session};
pub use password::SetPasswordInput;
pub use register::RegisterInput;

#[derive(Clone)]
pub struct Command {
    state: foodgram_shared::State,
    tokens: TokenSigner,
}

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: foodgram_shared::State, tokens: TokenSigner) -> Self {
        Self { state, tokens }
    }
}
