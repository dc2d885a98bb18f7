use url::Url;

use crate::ChallengeType;

/// Static configuration for a native-auth client: the application's client id,
/// the authority endpoint requests are sent to, and the challenge types this
/// application is able to satisfy.
#[derive(Debug, Clone)]
pub struct NativeAuthConfig {
    pub client_id: String,
    pub authority: Url,
    challenge_types: Vec<ChallengeType>,
}

impl NativeAuthConfig {
    /// `redirect` is always included in the advertised challenge types so the
    /// server can signal a browser fallback instead of failing outright.
    pub fn new(
        client_id: impl ToString,
        authority: Url,
        challenge_types: impl IntoIterator<Item = ChallengeType>,
    ) -> Self {
        let mut challenge_types: Vec<ChallengeType> = challenge_types
            .into_iter()
            .filter(|ct| *ct != ChallengeType::Redirect)
            .collect();
        challenge_types.push(ChallengeType::Redirect);

        Self { client_id: client_id.to_string(), authority, challenge_types }
    }

    pub fn challenge_types(&self) -> &[ChallengeType] {
        &self.challenge_types
    }

    pub fn supports(&self, challenge_type: ChallengeType) -> bool {
        self.challenge_types.contains(&challenge_type)
    }
}
