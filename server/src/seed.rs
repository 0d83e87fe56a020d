use learn2earn_store::Workflow;
use shared::{ServiceDraft, ServiceKind, UserProfile};

/// Populates an empty deployment with a starter catalog and demo profiles.
///
/// Idempotent: if the catalog or the profile store already holds anything,
/// nothing is written and the call reports that it skipped. Returns `true`
/// only when data was actually seeded.
pub fn seed_demo_data(workflow: &mut Workflow) -> bool {
    if !workflow.admin().services().is_empty() || !workflow.users().all_profiles().is_empty() {
        return false;
    }

    for draft in default_services() {
        workflow.admin_mut().add_service(draft);
    }
    for profile in demo_profiles() {
        workflow.users_mut().upsert_profile(profile);
    }

    true
}

fn default_services() -> Vec<ServiceDraft> {
    vec![
        ServiceDraft {
            name: "Web3 Builders Hackathon".to_owned(),
            kind: ServiceKind::Hackathon,
            token_cost: 100,
            wallet_address: "0x00000000000000000000000000000000000000a1".to_owned(),
            description: "48-hour team hackathon with mentor reviews".to_owned(),
            active: true,
        },
        ServiceDraft {
            name: "Intro to Smart Contracts".to_owned(),
            kind: ServiceKind::Course,
            token_cost: 60,
            wallet_address: "0x00000000000000000000000000000000000000a2".to_owned(),
            description: "Self-paced course, 8 modules".to_owned(),
            active: true,
        },
        ServiceDraft {
            name: "Career Workshop".to_owned(),
            kind: ServiceKind::Workshop,
            token_cost: 25,
            wallet_address: "0x00000000000000000000000000000000000000a3".to_owned(),
            description: "CV and interview prep with alumni".to_owned(),
            active: true,
        },
        ServiceDraft {
            name: "Campus Hoodie".to_owned(),
            kind: ServiceKind::Merchandise,
            token_cost: 40,
            wallet_address: "0x00000000000000000000000000000000000000a4".to_owned(),
            description: "Limited edition hoodie".to_owned(),
            active: true,
        },
    ]
}

fn demo_profiles() -> Vec<UserProfile> {
    vec![
        UserProfile::new(
            "demo-student".to_owned(),
            "Demo Student".to_owned(),
            "demo.student@example.com".to_owned(),
            "0x00000000000000000000000000000000000000b1".to_owned(),
        ),
        UserProfile::new(
            "demo-mentor".to_owned(),
            "Demo Mentor".to_owned(),
            "demo.mentor@example.com".to_owned(),
            "0x00000000000000000000000000000000000000b2".to_owned(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_is_idempotent() {
        let mut workflow = Workflow::default();

        assert!(seed_demo_data(&mut workflow));
        let services = workflow.admin().services().len();
        let profiles = workflow.users().all_profiles().len();
        assert!(services > 0 && profiles > 0);

        assert!(!seed_demo_data(&mut workflow));
        assert_eq!(workflow.admin().services().len(), services);
        assert_eq!(workflow.users().all_profiles().len(), profiles);
    }
}
