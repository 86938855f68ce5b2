//! Policy rule operations, including export to and import from disk.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::errors::{KineticError, KineticResult};
use crate::export::{export_file_path, list_json_files, read_json_file, slugify, write_pretty_json};
use crate::http::{encode_segment, ApiClient, KineticResponse};
use crate::payloads::{PolicyRule, PolicyRuleType};

/// Subdirectory of the export directory that policy rule files live in.
const EXPORT_SUBDIR: &str = "policyRules";

/// Service for policy rule operations.
pub struct PolicyRulesService<'a> {
    api: &'a ApiClient,
    export_directory: Option<&'a Path>,
}

impl<'a> PolicyRulesService<'a> {
    /// Creates a new policy rules service.
    pub fn new(api: &'a ApiClient, export_directory: Option<&'a Path>) -> Self {
        Self {
            api,
            export_directory,
        }
    }

    /// Creates a policy rule in its type category.
    pub async fn add_policy_rule(&self, rule: &PolicyRule) -> KineticResult<KineticResponse> {
        self.api
            .post(&self.type_path(rule.rule_type), rule)
            .await
    }

    /// Deletes a policy rule.
    pub async fn delete_policy_rule(
        &self,
        rule_type: PolicyRuleType,
        name: &str,
    ) -> KineticResult<KineticResponse> {
        self.api.delete(&self.rule_path(rule_type, name)).await
    }

    /// Deletes every policy rule across all four type categories, one delete
    /// call per listed rule, sequentially in listing order.
    ///
    /// Listed rules missing a usable type or name are skipped with a warning.
    pub async fn delete_policy_rules(&self) -> KineticResult<Vec<KineticResponse>> {
        info!("deleting all policy rules");
        let list = self.find_policy_rules(&[]).await?;
        let items = list.content()["policyRules"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut responses = Vec::with_capacity(items.len());
        for item in &items {
            let (Some(type_name), Some(name)) = (item["type"].as_str(), item["name"].as_str())
            else {
                warn!("skipping listed policy rule without a type and name");
                continue;
            };
            let Some(rule_type) = PolicyRuleType::from_name(type_name) else {
                warn!(rule_type = type_name, "skipping policy rule of unknown type");
                continue;
            };
            responses.push(self.delete_policy_rule(rule_type, name).await?);
        }
        Ok(responses)
    }

    /// Retrieves one type category of policy rules.
    pub async fn find_policy_rules_of_type(
        &self,
        rule_type: PolicyRuleType,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api.get(&self.type_path(rule_type), params).await
    }

    /// Retrieves the policy rules of all four type categories as one combined
    /// response.
    ///
    /// The returned content holds a single `policyRules` list containing each
    /// category's rules in category order, each category in its original
    /// listing order. The response envelope (status, message) is the last
    /// category's.
    pub async fn find_policy_rules(
        &self,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        let [first, rest @ ..] = PolicyRuleType::ALL;

        let mut rules = Vec::new();
        let mut response = self.fetch_rules_of_type(first, params, &mut rules).await?;
        for rule_type in rest {
            response = self.fetch_rules_of_type(rule_type, params, &mut rules).await?;
        }
        response.with_content(json!({ "policyRules": rules }))
    }

    /// Retrieves a single policy rule.
    pub async fn find_policy_rule(
        &self,
        rule_type: PolicyRuleType,
        name: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api.get(&self.rule_path(rule_type, name), params).await
    }

    /// Updates a policy rule.
    pub async fn update_policy_rule(
        &self,
        rule_type: PolicyRuleType,
        name: &str,
        rule: &PolicyRule,
    ) -> KineticResult<KineticResponse> {
        self.api.put(&self.rule_path(rule_type, name), rule).await
    }

    /// Exports one policy rule to
    /// `<export_directory>/policyRules/<type-slug>-<name-slug>.json`.
    ///
    /// Fails before any network call when no export directory is configured.
    /// A non-200 fetch is logged and skipped, returning `None`.
    pub async fn export_policy_rule(
        &self,
        rule_type: PolicyRuleType,
        name: &str,
    ) -> KineticResult<Option<PathBuf>> {
        let dir = self
            .export_directory
            .ok_or(KineticError::MissingExportDirectory)?;

        let params = vec![("include".to_string(), "consolePolicyRules".to_string())];
        let response = self.find_policy_rule(rule_type, name, &params).await?;
        if response.status() != 200 {
            warn!(
                rule_type = rule_type.as_str(),
                name,
                status = response.status(),
                "skipping export of unfetchable policy rule"
            );
            return Ok(None);
        }

        let path = rule_export_path(dir, rule_type.as_str(), name);
        write_pretty_json(&path, response.content())?;
        info!(path = %path.display(), "exported policy rule");
        Ok(Some(path))
    }

    /// Exports every policy rule across all four type categories.
    ///
    /// Fails before any network call when no export directory is configured.
    /// Listed rules missing a usable type or name are skipped with a warning.
    pub async fn export_policy_rules(&self) -> KineticResult<Vec<PathBuf>> {
        let dir = self
            .export_directory
            .ok_or(KineticError::MissingExportDirectory)?;
        info!(directory = %dir.display(), "exporting all policy rules");

        let params = vec![("include".to_string(), "consolePolicyRules".to_string())];
        let response = self.find_policy_rules(&params).await?;
        let items = response.content()["policyRules"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut paths = Vec::with_capacity(items.len());
        for item in &items {
            let (Some(type_name), Some(name)) = (item["type"].as_str(), item["name"].as_str())
            else {
                warn!("skipping export of policy rule without a type and name");
                continue;
            };
            let path = rule_export_path(dir, type_name, name);
            write_pretty_json(&path, item)?;
            paths.push(path);
        }
        info!(count = paths.len(), "exported policy rules");
        Ok(paths)
    }

    /// Imports every policy rule file under
    /// `<export_directory>/policyRules/`, in lexicographic filename order,
    /// updating rules that already exist and creating the rest.
    ///
    /// Fails before any work when no export directory is configured. A file
    /// that fails to parse aborts the remaining batch; rules imported before
    /// it stay imported.
    pub async fn import_policy_rules(&self) -> KineticResult<Vec<KineticResponse>> {
        let dir = self
            .export_directory
            .ok_or(KineticError::MissingExportDirectory)?;

        let paths = list_json_files(&dir.join(EXPORT_SUBDIR))?;
        info!(count = paths.len(), "importing policy rules");

        let mut responses = Vec::with_capacity(paths.len());
        for path in paths {
            let rule: PolicyRule = serde_json::from_value(read_json_file(&path)?)?;
            debug!(path = %path.display(), "importing policy rule");

            let existing = self.find_policy_rule(rule.rule_type, &rule.name, &[]).await?;
            let response = if existing.status() == 200 {
                self.update_policy_rule(rule.rule_type, &rule.name, &rule)
                    .await?
            } else {
                self.add_policy_rule(&rule).await?
            };
            responses.push(response);
        }
        Ok(responses)
    }

    async fn fetch_rules_of_type(
        &self,
        rule_type: PolicyRuleType,
        params: &[(String, String)],
        rules: &mut Vec<Value>,
    ) -> KineticResult<KineticResponse> {
        let response = self.find_policy_rules_of_type(rule_type, params).await?;
        if let Some(items) = response.content()["policyRules"].as_array() {
            rules.extend(items.iter().cloned());
        }
        Ok(response)
    }

    fn type_path(&self, rule_type: PolicyRuleType) -> String {
        format!("/policyRules/{}", encode_segment(rule_type.as_str()))
    }

    fn rule_path(&self, rule_type: PolicyRuleType, name: &str) -> String {
        format!(
            "/policyRules/{}/{}",
            encode_segment(rule_type.as_str()),
            encode_segment(name)
        )
    }
}

fn rule_export_path(dir: &Path, type_name: &str, name: &str) -> PathBuf {
    let stem = format!("{}-{}", slugify(type_name), slugify(name));
    export_file_path(dir, EXPORT_SUBDIR, &stem)
}
