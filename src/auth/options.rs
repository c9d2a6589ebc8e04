//! Request parameters that narrow what an installation token can reach.

// self
use crate::{_prelude::*, auth::InstallationPermissions, error::ConfigError};

/// Optional restrictions sent with a token request.
///
/// Empty fields are left out of the JSON body entirely, so the default value asks for a token with
/// every permission and repository the installation was granted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationTokenOptions {
	/// Repository names the token should be limited to.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub repositories: Vec<String>,
	/// Repository identifiers the token should be limited to.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub repository_ids: Vec<i64>,
	/// Subset of the installation's permissions to grant.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub permissions: InstallationPermissions,
}
impl InstallationTokenOptions {
	/// Limits the token to the named repository.
	pub fn repository(mut self, name: impl Into<String>) -> Self {
		self.repositories.push(name.into());

		self
	}

	/// Limits the token to the repository with the given identifier.
	pub fn repository_id(mut self, id: i64) -> Self {
		self.repository_ids.push(id);

		self
	}

	/// Requests `level` access for `permission`.
	pub fn permission(mut self, permission: impl Into<String>, level: impl Into<String>) -> Self {
		self.permissions.insert(permission.into(), level.into());

		self
	}

	/// Serializes the options into a request body.
	pub fn to_body(&self) -> Result<Vec<u8>, ConfigError> {
		serde_json::to_vec(self).map_err(|source| ConfigError::EncodeOptions { source })
	}
}

/// Encodes optional token options; `None` means the request carries no body.
pub(crate) fn encode_body(
	options: Option<&InstallationTokenOptions>,
) -> Result<Option<Vec<u8>>, ConfigError> {
	options.map(InstallationTokenOptions::to_body).transpose()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_fields_are_omitted() {
		let body = InstallationTokenOptions::default()
			.repository("hello-world")
			.to_body()
			.expect("Options should encode.");

		assert_eq!(body, br#"{"repositories":["hello-world"]}"#.to_vec());
	}

	#[test]
	fn permissions_are_sorted_and_encoded() {
		let options = InstallationTokenOptions::default()
			.repository_id(42)
			.permission("issues", "write")
			.permission("contents", "read");
		let value: serde_json::Value = serde_json::from_slice(
			&options.to_body().expect("Options with permissions should encode."),
		)
		.expect("Encoded options should be valid JSON.");

		assert_eq!(
			value,
			serde_json::json!({
				"repository_ids": [42],
				"permissions": { "contents": "read", "issues": "write" },
			})
		);
	}

	#[test]
	fn missing_options_produce_no_body() {
		assert_eq!(encode_body(None).expect("Absent options should encode."), None);
		assert_eq!(
			encode_body(Some(&InstallationTokenOptions::default()))
				.expect("Default options should encode."),
			Some(b"{}".to_vec())
		);
	}
}
