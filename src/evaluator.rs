//! One-shot evaluation for hosts that render the indicator themselves.

use secrecy::SecretString;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::classifier::{classify_secret, StrengthCategory};
use crate::indicator::{level_for, presentation, Tier};

/// Debounce applied before an async evaluation runs.
#[cfg(feature = "async")]
pub const DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(300);

/// Everything a host needs to paint the indicator and flag the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub category: StrengthCategory,
    pub level: u8,
    pub tier: Tier,
    pub label: &'static str,
    /// Custom validity message for the password input; `None` means valid.
    pub validity: Option<&'static str>,
}

/// Evaluates a password without touching any document.
pub fn evaluate_password_strength(password: &SecretString) -> Evaluation {
    let category = classify_secret(password);
    let level = level_for(category);
    let (tier, label) = presentation(level);

    Evaluation {
        category,
        level,
        tier,
        label,
        validity: category.validity_message(),
    }
}

/// Debounced evaluation that delivers its result over a channel.
///
/// Nothing is sent when `token` is cancelled before the debounce elapses, so a
/// host can cancel the previous keystroke's evaluation when a new one starts.
#[cfg(feature = "async")]
pub async fn evaluate_password_strength_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<Evaluation>,
) {
    #[cfg(feature = "tracing")]
    tracing::debug!("evaluation is about to start...");

    tokio::time::sleep(DEBOUNCE).await;
    if token.is_cancelled() {
        #[cfg(feature = "tracing")]
        tracing::debug!("evaluation cancelled");
        return;
    }

    let evaluation = evaluate_password_strength(password);

    if let Err(_e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", _e);
    }
}
