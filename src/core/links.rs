use crate::domain::{LinkRecord, Offering, Person};
use crate::storage::FileGateway;
use crate::utils::error::{Result, RosterError};

use super::store::Store;

const COLLECTION: &str = "links";

/// Link records between people and offerings, with pair uniqueness and
/// referential-integrity checks layered on top of the two entity stores.
///
/// The person and offering stores are supplied at the call site of `link`,
/// the only operation that needs them; deleting a person or offering does not
/// cascade to its link records.
pub struct LinkStore {
    gateway: FileGateway,
    records: Vec<LinkRecord>,
}

impl LinkStore {
    pub fn open(gateway: FileGateway) -> Result<Self> {
        let records: Vec<LinkRecord> = gateway.load(COLLECTION)?;
        tracing::debug!(collection = COLLECTION, count = records.len(), "store opened");
        Ok(Self { gateway, records })
    }

    fn persist(&self) -> Result<()> {
        self.gateway.save(COLLECTION, &self.records)
    }

    fn find(&self, person_id: &str, offering_code: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.person_id == person_id && r.offering_code == offering_code)
    }

    /// Creates a link after checking that both referenced entities exist and
    /// that the pair is not already linked.
    pub fn link(
        &mut self,
        people: &Store<Person>,
        offerings: &Store<Offering>,
        person_id: &str,
        offering_code: &str,
    ) -> Result<LinkRecord> {
        if people.get(person_id).is_none() {
            return Err(RosterError::NotFound {
                kind: "person",
                key: person_id.to_string(),
            });
        }
        if offerings.get(offering_code).is_none() {
            return Err(RosterError::NotFound {
                kind: "offering",
                key: offering_code.to_string(),
            });
        }
        if self.find(person_id, offering_code).is_some() {
            return Err(RosterError::DuplicateLink {
                person_id: person_id.to_string(),
                offering_code: offering_code.to_string(),
            });
        }

        let record = LinkRecord::new(person_id, offering_code);
        let errors = record.validate();
        if !errors.is_empty() {
            return Err(RosterError::validation("link", errors));
        }

        self.records.push(record.clone());
        self.persist()?;

        tracing::info!(person_id, offering_code, "linked");
        Ok(record)
    }

    /// Sets the score on an existing link. The new score is staged on a copy
    /// and validated there, so an invalid score leaves the record untouched.
    pub fn assign_score(
        &mut self,
        person_id: &str,
        offering_code: &str,
        score: f64,
    ) -> Result<LinkRecord> {
        let index = self
            .find(person_id, offering_code)
            .ok_or_else(|| RosterError::NotFound {
                kind: "link",
                key: format!("{} -> {}", person_id, offering_code),
            })?;

        let mut staged = self.records[index].clone();
        staged.score = Some(score);

        let errors = staged.validate();
        if !errors.is_empty() {
            return Err(RosterError::validation("link", errors));
        }

        self.records[index] = staged.clone();
        self.persist()?;

        tracing::info!(person_id, offering_code, score, "score assigned");
        Ok(staged)
    }

    /// Removes the matching link if present; reports whether a removal
    /// occurred.
    pub fn unlink(&mut self, person_id: &str, offering_code: &str) -> Result<bool> {
        match self.find(person_id, offering_code) {
            Some(index) => {
                self.records.remove(index);
                self.persist()?;
                tracing::info!(person_id, offering_code, "unlinked");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn links_for_person(&self, person_id: &str) -> Vec<LinkRecord> {
        self.records
            .iter()
            .filter(|r| r.person_id == person_id)
            .cloned()
            .collect()
    }

    pub fn links_for_offering(&self, offering_code: &str) -> Vec<LinkRecord> {
        self.records
            .iter()
            .filter(|r| r.offering_code == offering_code)
            .cloned()
            .collect()
    }

    /// Mean of the scored links for a person; 0.0 when none carry a score.
    pub fn average_for_person(&self, person_id: &str) -> f64 {
        Self::average(self.links_for_person(person_id))
    }

    /// Mean of the scored links for an offering; 0.0 when none carry a score.
    pub fn average_for_offering(&self, offering_code: &str) -> f64 {
        Self::average(self.links_for_offering(offering_code))
    }

    fn average(records: Vec<LinkRecord>) -> f64 {
        let scores: Vec<f64> = records.into_iter().filter_map(|r| r.score).collect();
        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        people: Store<Person>,
        offerings: Store<Offering>,
        links: LinkStore,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let gateway = FileGateway::new(dir.path()).unwrap();

        let mut people = Store::open(gateway.clone(), "people").unwrap();
        people
            .create(Person::new("P1", "Jane Doe", "jane@example.com", "CS"))
            .unwrap();
        people
            .create(Person::new("P2", "John Roe", "john@example.com", "CS"))
            .unwrap();

        let mut offerings = Store::open(gateway.clone(), "offerings").unwrap();
        offerings
            .create(Offering::new("ABC1234", "Intro", 3, "Dr. X"))
            .unwrap();

        let links = LinkStore::open(gateway).unwrap();

        Fixture {
            _dir: dir,
            people,
            offerings,
            links,
        }
    }

    #[test]
    fn test_link_requires_existing_person() {
        let mut f = fixture();
        let result = f.links.link(&f.people, &f.offerings, "P9", "ABC1234");
        assert!(
            matches!(result, Err(RosterError::NotFound { kind: "person", .. })),
            "unknown person must be rejected"
        );
    }

    #[test]
    fn test_link_requires_existing_offering() {
        let mut f = fixture();
        let result = f.links.link(&f.people, &f.offerings, "P1", "XYZ9999");
        assert!(matches!(
            result,
            Err(RosterError::NotFound { kind: "offering", .. })
        ));
    }

    #[test]
    fn test_link_pair_is_unique() {
        let mut f = fixture();
        f.links
            .link(&f.people, &f.offerings, "P1", "ABC1234")
            .unwrap();

        let result = f.links.link(&f.people, &f.offerings, "P1", "ABC1234");
        assert!(matches!(result, Err(RosterError::DuplicateLink { .. })));
        assert_eq!(f.links.links_for_person("P1").len(), 1);
    }

    #[test]
    fn test_new_link_is_unscored() {
        let mut f = fixture();
        let record = f
            .links
            .link(&f.people, &f.offerings, "P1", "ABC1234")
            .unwrap();

        assert_eq!(record.score, None);
        assert_eq!(record.letter_grade(), "N/A");
    }

    #[test]
    fn test_assign_score_updates_record() {
        let mut f = fixture();
        f.links
            .link(&f.people, &f.offerings, "P1", "ABC1234")
            .unwrap();

        let record = f.links.assign_score("P1", "ABC1234", 85.0).unwrap();
        assert_eq!(record.score, Some(85.0));
        assert_eq!(record.letter_grade(), "A");

        let for_person = f.links.links_for_person("P1");
        assert_eq!(for_person.len(), 1);
        assert_eq!(for_person[0].score, Some(85.0));
    }

    #[test]
    fn test_assign_score_without_link_is_not_found() {
        let mut f = fixture();
        let result = f.links.assign_score("P1", "ABC1234", 85.0);
        assert!(matches!(result, Err(RosterError::NotFound { .. })));
    }

    #[test]
    fn test_invalid_score_reverts() {
        let mut f = fixture();
        f.links
            .link(&f.people, &f.offerings, "P1", "ABC1234")
            .unwrap();
        f.links.assign_score("P1", "ABC1234", 70.0).unwrap();

        let result = f.links.assign_score("P1", "ABC1234", 150.0);
        assert!(matches!(result, Err(RosterError::Validation { .. })));
        assert_eq!(f.links.links_for_person("P1")[0].score, Some(70.0));
    }

    #[test]
    fn test_nan_score_is_rejected_and_reverts() {
        let mut f = fixture();
        f.links
            .link(&f.people, &f.offerings, "P1", "ABC1234")
            .unwrap();
        f.links.assign_score("P1", "ABC1234", 70.0).unwrap();

        let result = f.links.assign_score("P1", "ABC1234", f64::NAN);
        assert!(matches!(result, Err(RosterError::Validation { .. })));
        assert_eq!(f.links.links_for_person("P1")[0].score, Some(70.0));
        assert_eq!(f.links.average_for_person("P1"), 70.0);
    }

    #[test]
    fn test_unlink_reports_removal() {
        let mut f = fixture();
        f.links
            .link(&f.people, &f.offerings, "P1", "ABC1234")
            .unwrap();

        assert!(f.links.unlink("P1", "ABC1234").unwrap());
        assert!(f.links.links_for_person("P1").is_empty());
        assert!(!f.links.unlink("P1", "ABC1234").unwrap());
    }

    #[test]
    fn test_average_for_offering() {
        let mut f = fixture();
        f.links
            .link(&f.people, &f.offerings, "P1", "ABC1234")
            .unwrap();
        f.links
            .link(&f.people, &f.offerings, "P2", "ABC1234")
            .unwrap();

        assert_eq!(f.links.average_for_offering("ABC1234"), 0.0);

        f.links.assign_score("P1", "ABC1234", 70.0).unwrap();
        f.links.assign_score("P2", "ABC1234", 90.0).unwrap();
        assert_eq!(f.links.average_for_offering("ABC1234"), 80.0);
    }

    #[test]
    fn test_average_ignores_unscored_records() {
        let mut f = fixture();
        f.links
            .link(&f.people, &f.offerings, "P1", "ABC1234")
            .unwrap();
        f.links
            .link(&f.people, &f.offerings, "P2", "ABC1234")
            .unwrap();
        f.links.assign_score("P1", "ABC1234", 60.0).unwrap();

        assert_eq!(f.links.average_for_offering("ABC1234"), 60.0);
        assert_eq!(f.links.average_for_person("P1"), 60.0);
        assert_eq!(f.links.average_for_person("P2"), 0.0);
    }

    #[test]
    fn test_deleting_person_does_not_cascade() {
        let mut f = fixture();
        f.links
            .link(&f.people, &f.offerings, "P1", "ABC1234")
            .unwrap();

        assert!(f.people.delete("P1").unwrap());
        assert_eq!(f.links.links_for_person("P1").len(), 1);
    }
}
