//! # Discovery Filters
//!
//! Candidate filter pipeline used by IdP discovery. Checks run in a fixed
//! order and stop at the first failure.

use crate::domain::entities::{IdpAssociation, NodeDetail};

/// True if every requested item appears in `offered`.
///
/// An empty request matches anything.
pub fn contains_all<T: PartialEq>(offered: &[T], requested: &[T]) -> bool {
    requested.iter().all(|wanted| offered.contains(wanted))
}

/// Reason a candidate was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NodeInactive,
    AssuranceTooLow,
    AssociationInactive,
    AssociationIalTooLow,
    NotInAllowList,
    MissingDataUrlTypes,
    MissingModes,
}

/// Criteria of an IdP discovery query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdpCriteria {
    pub min_ial: f64,
    pub min_aal: f64,
    pub node_id_list: Vec<String>,
    pub supported_request_message_data_url_type_list: Vec<String>,
    pub mode_list: Vec<i32>,
}

impl IdpCriteria {
    /// Run the pipeline for one candidate.
    ///
    /// `association` is present only for identity-scoped queries; the mode
    /// filter applies only then.
    pub fn check(
        &self,
        node_id: &str,
        node: &NodeDetail,
        association: Option<&IdpAssociation>,
    ) -> Result<(), Rejection> {
        if !node.active {
            return Err(Rejection::NodeInactive);
        }
        if !(node.max_ial >= self.min_ial && node.max_aal >= self.min_aal) {
            return Err(Rejection::AssuranceTooLow);
        }
        if let Some(association) = association {
            if !association.active {
                return Err(Rejection::AssociationInactive);
            }
            if association.ial < self.min_ial {
                return Err(Rejection::AssociationIalTooLow);
            }
        }
        if !self.node_id_list.is_empty() && !self.node_id_list.iter().any(|id| id == node_id) {
            return Err(Rejection::NotInAllowList);
        }
        if !contains_all(
            &node.supported_request_message_data_url_type_list,
            &self.supported_request_message_data_url_type_list,
        ) {
            return Err(Rejection::MissingDataUrlTypes);
        }
        if let Some(association) = association {
            if !contains_all(&association.mode, &self.mode_list) {
                return Err(Rejection::MissingModes);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;

    fn idp(max_ial: f64, max_aal: f64, types: &[&str]) -> NodeDetail {
        let mut node = NodeDetail::new("idp", Role::IdP);
        node.max_ial = max_ial;
        node.max_aal = max_aal;
        node.supported_request_message_data_url_type_list =
            types.iter().map(|t| t.to_string()).collect();
        node
    }

    fn association(active: bool, ial: f64, mode: Vec<i32>) -> IdpAssociation {
        IdpAssociation {
            node_id: "idp1".into(),
            active,
            ial,
            mode,
            accessors: vec![],
        }
    }

    #[test]
    fn test_contains_all_is_superset_check() {
        assert!(contains_all(&["A", "B"], &["A"]));
        assert!(contains_all(&["A", "B"], &["B", "A"]));
        assert!(!contains_all(&["A"], &["A", "B"]));
        // Duplicates in the offer do not stand in for a missing item.
        assert!(!contains_all(&["A", "A"], &["A", "B"]));
        assert!(contains_all::<&str>(&[], &[]));
    }

    #[test]
    fn test_assurance_levels() {
        let criteria = IdpCriteria {
            min_ial: 2.3,
            min_aal: 2.0,
            ..Default::default()
        };
        assert_eq!(criteria.check("idp1", &idp(2.3, 2.0, &[]), None), Ok(()));
        assert_eq!(
            criteria.check("idp1", &idp(2.2, 3.0, &[]), None),
            Err(Rejection::AssuranceTooLow)
        );
        assert_eq!(
            criteria.check("idp1", &idp(3.0, 1.1, &[]), None),
            Err(Rejection::AssuranceTooLow)
        );
    }

    #[test]
    fn test_inactive_node_rejected_first() {
        let mut node = idp(0.0, 0.0, &[]);
        node.active = false;
        let criteria = IdpCriteria {
            min_ial: 9.0,
            ..Default::default()
        };
        assert_eq!(criteria.check("idp1", &node, None), Err(Rejection::NodeInactive));
    }

    #[test]
    fn test_allow_list_and_data_url_types() {
        let node = idp(3.0, 3.0, &["text/plain"]);
        let criteria = IdpCriteria {
            node_id_list: vec!["idp2".into()],
            ..Default::default()
        };
        assert_eq!(criteria.check("idp1", &node, None), Err(Rejection::NotInAllowList));

        let criteria = IdpCriteria {
            supported_request_message_data_url_type_list: vec![
                "text/plain".into(),
                "application/pdf".into(),
            ],
            ..Default::default()
        };
        assert_eq!(
            criteria.check("idp1", &node, None),
            Err(Rejection::MissingDataUrlTypes)
        );
    }

    #[test]
    fn test_association_checks() {
        let node = idp(3.0, 3.0, &[]);
        let criteria = IdpCriteria {
            min_ial: 2.0,
            mode_list: vec![2],
            ..Default::default()
        };
        assert_eq!(
            criteria.check("idp1", &node, Some(&association(true, 2.3, vec![2, 3]))),
            Ok(())
        );
        assert_eq!(
            criteria.check("idp1", &node, Some(&association(false, 2.3, vec![2, 3]))),
            Err(Rejection::AssociationInactive)
        );
        assert_eq!(
            criteria.check("idp1", &node, Some(&association(true, 1.1, vec![2, 3]))),
            Err(Rejection::AssociationIalTooLow)
        );

        let criteria = IdpCriteria {
            mode_list: vec![2, 4],
            ..Default::default()
        };
        assert_eq!(
            criteria.check("idp1", &node, Some(&association(true, 2.3, vec![2, 3]))),
            Err(Rejection::MissingModes)
        );
        // Mode filter is ignored without an association.
        assert_eq!(criteria.check("idp1", &node, None), Ok(()));
    }
}
