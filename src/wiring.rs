//! Wiring - discovers password groups in a [`Document`] and routes input and
//! click events to the classifier, indicator, matcher and visibility toggle.

use crate::classifier::{classify_secret, StrengthCategory};
use crate::config::CheckerConfig;
use crate::dom::{Document, Element, NodeId};
use crate::error::CheckerError;
use crate::indicator::{apply_indicator, level_for};
use crate::matcher::{validate_match, ValidatedField};
use crate::visibility::{toggle_visibility, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Click,
}

/// Elements of one password group, resolved once at attach time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordGroup {
    pub container: NodeId,
    pub password: NodeId,
    pub confirm: Option<NodeId>,
    pub toggle: Option<NodeId>,
    pub strength_bar: Option<NodeId>,
    /// Whether the owning form opted into client-side match validation.
    pub client_validation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Strength,
    Compare,
    Toggle,
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    target: NodeId,
    kind: EventKind,
    group: usize,
    action: Action,
}

/// Listener registry for every password group found by [`PasswordChecker::attach`].
#[derive(Debug)]
pub struct PasswordChecker {
    config: CheckerConfig,
    groups: Vec<PasswordGroup>,
    listeners: Vec<Listener>,
    skipped: Vec<CheckerError>,
}

impl PasswordChecker {
    /// Scans `doc` once and wires every password group it contains.
    ///
    /// A group without a password input is skipped and recorded in
    /// [`skipped`](Self::skipped); the remaining groups are still wired.
    /// Groups added to the document later are not picked up.
    pub fn attach(doc: &Document, config: CheckerConfig) -> Self {
        let mut checker = Self {
            config,
            groups: Vec::new(),
            listeners: Vec::new(),
            skipped: Vec::new(),
        };

        for container in doc.query_selector_all(doc.root(), &checker.config.selectors.group) {
            match checker.resolve_group(doc, container) {
                Ok(group) => checker.register(group),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Password group not wired: {}", e);
                    checker.skipped.push(e);
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Password checker attached: {} groups wired, {} skipped",
            checker.groups.len(),
            checker.skipped.len()
        );

        checker
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn groups(&self) -> &[PasswordGroup] {
        &self.groups
    }

    pub fn skipped(&self) -> &[CheckerError] {
        &self.skipped
    }

    fn resolve_group(
        &self,
        doc: &Document,
        container: NodeId,
    ) -> Result<PasswordGroup, CheckerError> {
        let selectors = &self.config.selectors;
        let password = doc
            .query_selector(container, &selectors.password)
            .ok_or_else(|| CheckerError::MissingElement {
                group: container,
                selector: selectors.password.to_string(),
            })?;

        let strength_bar = doc.query_selector(container, &selectors.strength_bar);
        #[cfg(feature = "tracing")]
        if strength_bar.is_none() {
            tracing::warn!(
                "Password group {:?} has no strength bar; display disabled",
                container
            );
        }

        let client_validation = doc
            .form_of(password)
            .and_then(|form| doc.element(form).ok())
            .is_some_and(|form| form.has_class(&self.config.validation_marker));

        Ok(PasswordGroup {
            container,
            password,
            confirm: doc.query_selector(container, &selectors.confirm),
            toggle: doc.query_selector(container, &selectors.toggle),
            strength_bar,
            client_validation,
        })
    }

    fn register(&mut self, group: PasswordGroup) {
        let index = self.groups.len();
        let mut listen = |target, kind, action| {
            self.listeners.push(Listener {
                target,
                kind,
                group: index,
                action,
            })
        };

        listen(group.password, EventKind::Input, Action::Strength);
        if let Some(toggle) = group.toggle {
            listen(toggle, EventKind::Click, Action::Toggle);
        }
        if group.client_validation {
            if let Some(confirm) = group.confirm {
                listen(confirm, EventKind::Input, Action::Compare);
            }
        }

        self.groups.push(group);
    }

    /// Runs the listeners registered on `target` for `kind`, in registration
    /// order, and returns how many ran.
    pub fn dispatch(
        &self,
        doc: &mut Document,
        target: NodeId,
        kind: EventKind,
    ) -> Result<usize, CheckerError> {
        doc.element(target)?;

        let mut ran = 0;
        for listener in self
            .listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
        {
            let group = &self.groups[listener.group];
            match listener.action {
                Action::Strength => {
                    self.on_password_input(doc, group)?;
                }
                Action::Compare => {
                    self.compare(doc, group)?;
                }
                Action::Toggle => {
                    self.toggle(doc, group)?;
                }
            }
            ran += 1;
        }
        Ok(ran)
    }

    /// Sets the value of an input and dispatches an `input` event on it.
    pub fn input(
        &self,
        doc: &mut Document,
        target: NodeId,
        value: &str,
    ) -> Result<usize, CheckerError> {
        doc.element_mut(target)?.set_value(value);
        self.dispatch(doc, target, EventKind::Input)
    }

    /// Dispatches a `click` event.
    pub fn click(&self, doc: &mut Document, target: NodeId) -> Result<usize, CheckerError> {
        self.dispatch(doc, target, EventKind::Click)
    }

    fn on_password_input(
        &self,
        doc: &mut Document,
        group: &PasswordGroup,
    ) -> Result<StrengthCategory, CheckerError> {
        let category = classify_secret(doc.element(group.password)?.value());

        doc.element_mut(group.password)?
            .set_custom_validity(category.validity_message().unwrap_or(""));
        if let Some(bar) = group.strength_bar {
            apply_indicator(doc.element_mut(bar)?, level_for(category));
        }

        if group.client_validation {
            self.compare(doc, group)?;
        }
        Ok(category)
    }

    fn compare(&self, doc: &mut Document, group: &PasswordGroup) -> Result<(), CheckerError> {
        let Some(confirm) = group.confirm else {
            return Ok(());
        };

        let feedback = doc.next_element_sibling(confirm).filter(|&sibling| {
            sibling != group.password
                && doc
                    .element(sibling)
                    .is_ok_and(|el| el.has_class(&self.config.feedback_marker))
        });

        let _outcome = match feedback {
            Some(feedback) => {
                let [confirm, password, feedback] =
                    doc.elements_mut([confirm, group.password, feedback])?;
                validate_match(confirm, &*password, Some(feedback))
            }
            None => {
                let [confirm, password] = doc.elements_mut([confirm, group.password])?;
                validate_match::<_, _, Element>(confirm, &*password, None)
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("Confirmation check for group {:?}: {:?}", group.container, _outcome);

        Ok(())
    }

    fn toggle(
        &self,
        doc: &mut Document,
        group: &PasswordGroup,
    ) -> Result<Visibility, CheckerError> {
        let next = match (group.confirm, group.toggle) {
            (Some(confirm), Some(icon)) => {
                let [password, confirm, icon] =
                    doc.elements_mut([group.password, confirm, icon])?;
                toggle_visibility(password, Some(confirm), Some(icon))
            }
            (Some(confirm), None) => {
                let [password, confirm] = doc.elements_mut([group.password, confirm])?;
                toggle_visibility::<_, Element>(password, Some(confirm), None)
            }
            (None, Some(icon)) => {
                let [password, icon] = doc.elements_mut([group.password, icon])?;
                toggle_visibility::<Element, _>(password, None, Some(icon))
            }
            (None, None) => {
                toggle_visibility::<_, Element>(doc.element_mut(group.password)?, None, None)
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("Visibility for group {:?} set to {:?}", group.container, next);

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{MISMATCH_MESSAGE, MISSING_PASSWORD_MESSAGE};

    struct Ids {
        password: NodeId,
        confirm: NodeId,
        feedback: NodeId,
        toggle: NodeId,
        bar: NodeId,
    }

    fn add_group(doc: &mut Document, parent: NodeId) -> Ids {
        let group = doc.append(parent, "div", &[("class", "password-group")]).unwrap();
        let password = doc
            .append(group, "input", &[("id", "password-input"), ("type", "password")])
            .unwrap();
        let toggle = doc
            .append(group, "i", &[("id", "visibility-btn"), ("class", "bi bi-eye-slash")])
            .unwrap();
        let confirm = doc
            .append(group, "input", &[("id", "password-confirm"), ("type", "password")])
            .unwrap();
        let feedback = doc
            .append(group, "div", &[("class", "invalid-feedback")])
            .unwrap();
        let progress = doc.append(group, "div", &[("class", "progress")]).unwrap();
        let bar = doc
            .append(
                progress,
                "div",
                &[
                    ("id", "password-strength-bar"),
                    ("class", "progress-bar"),
                    ("aria-valuenow", "0"),
                ],
            )
            .unwrap();
        Ids {
            password,
            confirm,
            feedback,
            toggle,
            bar,
        }
    }

    fn signup_form(form_class: &str) -> (Document, Ids) {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.append(root, "form", &[("class", form_class)]).unwrap();
        let ids = add_group(&mut doc, form);
        (doc, ids)
    }

    fn bar_state(doc: &Document, bar: NodeId) -> (Option<String>, Option<String>, String) {
        let el = doc.element(bar).unwrap();
        (
            el.attribute("aria-valuenow").map(str::to_string),
            el.width().map(str::to_string),
            el.text().to_string(),
        )
    }

    #[test]
    fn test_typing_updates_indicator() {
        let (mut doc, ids) = signup_form("needs-validation");
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());

        checker.input(&mut doc, ids.password, "Password1!").unwrap();
        assert_eq!(
            bar_state(&doc, ids.bar),
            (Some("75".into()), Some("75%".into()), "Strong".into())
        );
        assert!(doc.element(ids.bar).unwrap().has_class("bg-info"));

        checker.input(&mut doc, ids.password, "").unwrap();
        assert_eq!(
            bar_state(&doc, ids.bar),
            (Some("0".into()), Some("0".into()), String::new())
        );
        let bar = doc.element(ids.bar).unwrap();
        assert!(bar.has_class("bg-danger"));
        assert!(!bar.has_class("bg-info"));
        assert!(bar.has_class("progress-bar"));
    }

    #[test]
    fn test_weak_password_is_marked_invalid() {
        let (mut doc, ids) = signup_form("");
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());

        checker.input(&mut doc, ids.password, "abc").unwrap();
        assert_eq!(
            doc.element(ids.password).unwrap().custom_validity(),
            "Weak password is not accepted"
        );

        checker.input(&mut doc, ids.password, "abcdefgh").unwrap();
        assert!(doc.element(ids.password).unwrap().is_valid());
        assert_eq!(doc.element(ids.bar).unwrap().text(), "Moderate");
    }

    #[test]
    fn test_client_validation_checks_confirmation() {
        let (mut doc, ids) = signup_form("row needs-validation");
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());
        assert!(checker.groups()[0].client_validation);

        checker.input(&mut doc, ids.password, "Password1!").unwrap();
        assert_eq!(doc.element(ids.confirm).unwrap().custom_validity(), MISMATCH_MESSAGE);
        assert_eq!(doc.element(ids.feedback).unwrap().text(), MISMATCH_MESSAGE);

        assert_eq!(checker.input(&mut doc, ids.confirm, "Password1!").unwrap(), 1);
        assert!(doc.element(ids.confirm).unwrap().is_valid());
        assert_eq!(doc.element(ids.feedback).unwrap().text(), MISSING_PASSWORD_MESSAGE);

        // editing the password again breaks the match
        checker.input(&mut doc, ids.password, "Password1!x").unwrap();
        assert!(!doc.element(ids.confirm).unwrap().is_valid());
    }

    #[test]
    fn test_without_client_validation_confirmation_is_ignored() {
        let (mut doc, ids) = signup_form("plain");
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());
        assert!(!checker.groups()[0].client_validation);

        checker.input(&mut doc, ids.password, "Password1!").unwrap();
        assert_eq!(checker.input(&mut doc, ids.confirm, "nope").unwrap(), 0);
        assert!(doc.element(ids.confirm).unwrap().is_valid());
        assert_eq!(doc.element(ids.feedback).unwrap().text(), "");
    }

    #[test]
    fn test_group_outside_form_has_no_client_validation() {
        let mut doc = Document::new();
        let root = doc.root();
        let ids = add_group(&mut doc, root);
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());

        assert!(!checker.groups()[0].client_validation);
        checker.input(&mut doc, ids.password, "Abcdefghij123456!@#$").unwrap();
        assert_eq!(doc.element(ids.bar).unwrap().text(), "Very Strong");
    }

    #[test]
    fn test_feedback_requires_marker_class() {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.append(root, "form", &[("class", "needs-validation")]).unwrap();
        let group = doc.append(form, "div", &[("class", "password-group")]).unwrap();
        let password = doc.append(group, "input", &[("id", "password-input")]).unwrap();
        let confirm = doc.append(group, "input", &[("id", "password-confirm")]).unwrap();
        let hint = doc.append(group, "small", &[("class", "form-text")]).unwrap();
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());

        checker.input(&mut doc, password, "abc").unwrap();
        assert_eq!(doc.element(confirm).unwrap().custom_validity(), MISMATCH_MESSAGE);
        assert_eq!(doc.element(hint).unwrap().text(), "");
    }

    #[test]
    fn test_feedback_marker_on_password_field_is_not_rewritten() {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.append(root, "form", &[("class", "needs-validation")]).unwrap();
        let group = doc.append(form, "div", &[("class", "password-group")]).unwrap();
        let confirm = doc.append(group, "input", &[("id", "password-confirm")]).unwrap();
        let password = doc
            .append(group, "input", &[("id", "password-input"), ("class", "invalid-feedback")])
            .unwrap();
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());

        assert_eq!(checker.input(&mut doc, confirm, "other").unwrap(), 1);
        assert_eq!(doc.element(confirm).unwrap().custom_validity(), MISMATCH_MESSAGE);
        assert_eq!(doc.element(password).unwrap().text(), "");
    }

    #[test]
    fn test_toggle_without_confirm_or_icon() {
        let mut doc = Document::new();
        let root = doc.root();
        let group = doc.append(root, "div", &[("class", "password-group")]).unwrap();
        let password = doc
            .append(group, "input", &[("id", "password-input"), ("type", "password")])
            .unwrap();
        let toggle = doc.append(group, "button", &[("id", "visibility-btn")]).unwrap();
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());

        checker.click(&mut doc, toggle).unwrap();
        assert_eq!(doc.element(password).unwrap().attribute("type"), Some("text"));
        assert!(doc.element(toggle).unwrap().has_class("bi-eye"));
    }

    #[test]
    fn test_toggle_round_trip() {
        let (mut doc, ids) = signup_form("needs-validation");
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());

        assert_eq!(checker.click(&mut doc, ids.toggle).unwrap(), 1);
        assert_eq!(doc.element(ids.password).unwrap().attribute("type"), Some("text"));
        assert_eq!(doc.element(ids.confirm).unwrap().attribute("type"), Some("text"));
        let icon = doc.element(ids.toggle).unwrap();
        assert!(icon.has_class("bi-eye") && !icon.has_class("bi-eye-slash"));

        checker.click(&mut doc, ids.toggle).unwrap();
        assert_eq!(doc.element(ids.password).unwrap().attribute("type"), Some("password"));
        assert_eq!(doc.element(ids.confirm).unwrap().attribute("type"), Some("password"));
        let icon = doc.element(ids.toggle).unwrap();
        assert_eq!(icon.classes(), &["bi".to_string(), "bi-eye-slash".to_string()]);
    }

    #[test]
    fn test_toggle_has_no_validation_side_effects() {
        let (mut doc, ids) = signup_form("needs-validation");
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());
        doc.element_mut(ids.confirm).unwrap().set_value("different");

        checker.click(&mut doc, ids.toggle).unwrap();
        assert!(doc.element(ids.confirm).unwrap().is_valid());
        assert_eq!(bar_state(&doc, ids.bar).2, "");
    }

    #[test]
    fn test_groups_are_independent() {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.append(root, "form", &[]).unwrap();
        let first = add_group(&mut doc, form);
        let second = add_group(&mut doc, form);
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());
        assert_eq!(checker.groups().len(), 2);

        checker.input(&mut doc, second.password, "Password1!").unwrap();
        assert_eq!(doc.element(second.bar).unwrap().text(), "Strong");
        assert_eq!(doc.element(first.bar).unwrap().text(), "");

        checker.click(&mut doc, first.toggle).unwrap();
        assert_eq!(doc.element(first.password).unwrap().attribute("type"), Some("text"));
        assert_eq!(doc.element(second.password).unwrap().attribute("type"), Some("password"));
    }

    #[test]
    fn test_incomplete_group_is_skipped() {
        let mut doc = Document::new();
        let root = doc.root();
        let broken = doc.append(root, "div", &[("class", "password-group")]).unwrap();
        doc.append(broken, "div", &[("id", "password-strength-bar")]).unwrap();
        let ids = add_group(&mut doc, root);

        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());

        assert_eq!(checker.groups().len(), 1);
        assert_eq!(
            checker.skipped(),
            &[CheckerError::MissingElement {
                group: broken,
                selector: "#password-input".to_string(),
            }]
        );
        checker.input(&mut doc, ids.password, "abc").unwrap();
        assert_eq!(doc.element(ids.bar).unwrap().text(), "Weak");
    }

    #[test]
    fn test_minimal_group_degrades() {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.append(root, "form", &[("class", "needs-validation")]).unwrap();
        let group = doc.append(form, "div", &[("class", "password-group")]).unwrap();
        let password = doc.append(group, "input", &[("id", "password-input")]).unwrap();
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());

        let wired = &checker.groups()[0];
        assert_eq!((wired.confirm, wired.toggle, wired.strength_bar), (None, None, None));
        assert_eq!(checker.input(&mut doc, password, "abc").unwrap(), 1);
        assert!(!doc.element(password).unwrap().is_valid());
    }

    #[test]
    fn test_late_groups_are_not_wired() {
        let mut doc = Document::new();
        let root = doc.root();
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());
        let ids = add_group(&mut doc, root);

        assert_eq!(checker.input(&mut doc, ids.password, "Password1!").unwrap(), 0);
        assert_eq!(doc.element(ids.bar).unwrap().text(), "");
    }

    #[test]
    fn test_custom_selectors() {
        let mut doc = Document::new();
        let root = doc.root();
        let group = doc.append(root, "section", &[("class", "pwd-box")]).unwrap();
        let password = doc.append(group, "input", &[("id", "secret")]).unwrap();
        let bar = doc.append(group, "div", &[("id", "meter")]).unwrap();

        let mut config = CheckerConfig::default();
        config.selectors.group = ".pwd-box".parse().unwrap();
        config.selectors.password = "#secret".parse().unwrap();
        config.selectors.strength_bar = "#meter".parse().unwrap();
        let checker = PasswordChecker::attach(&doc, config);

        checker.input(&mut doc, password, "abcdefgh").unwrap();
        assert_eq!(doc.element(bar).unwrap().text(), "Moderate");
    }

    #[test]
    fn test_dispatch_unknown_node() {
        let (mut doc, _) = signup_form("");
        let checker = PasswordChecker::attach(&doc, CheckerConfig::default());
        let mut other = Document::new();
        let foreign = (0..32)
            .map(|_| other.create_element("div"))
            .last()
            .unwrap();

        assert_eq!(
            checker.dispatch(&mut doc, foreign, EventKind::Input),
            Err(CheckerError::UnknownNode(foreign))
        );
    }
}
