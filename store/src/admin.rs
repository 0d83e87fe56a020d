use chrono::Utc;
use shared::{Service, ServiceDraft, ServiceId, ServicePatch, Transaction, TransactionDraft};

/// Admin-facing state: the service catalog and the token ledger.
///
/// The ledger is a record of movements, not an authority. It accepts any
/// entry without checking balances; the user store is where debits are
/// validated.
#[derive(Debug, Default)]
pub struct AdminDataStore {
    services: Vec<Service>,
    next_service_id: ServiceId,
    transactions: Vec<Transaction>,
    next_transaction_id: u64,
}

impl AdminDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn service(&self, id: ServiceId) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn add_service(&mut self, draft: ServiceDraft) -> &Service {
        let id = self.next_service_id;
        self.next_service_id += 1;
        self.services.push(draft.into_service(id));
        self.services.last().unwrap()
    }

    pub fn update_service(&mut self, id: ServiceId, patch: ServicePatch) -> bool {
        match self.services.iter_mut().find(|s| s.id == id) {
            Some(service) => {
                patch.apply(service);
                true
            }
            None => false,
        }
    }

    pub fn delete_service(&mut self, id: ServiceId) -> bool {
        let before = self.services.len();
        self.services.retain(|s| s.id != id);
        self.services.len() != before
    }

    pub fn record_enrollment(&mut self, id: ServiceId) -> bool {
        match self.services.iter_mut().find(|s| s.id == id) {
            Some(service) => {
                service.enrollments += 1;
                true
            }
            None => false,
        }
    }

    /// Pure append; ids are assigned monotonically, newest entries last.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> &Transaction {
        let id = self.next_transaction_id;
        self.next_transaction_id += 1;
        self.transactions.push(Transaction {
            id,
            kind: draft.kind,
            from: draft.from,
            to: draft.to,
            amount: draft.amount,
            status: draft.status,
            description: draft.description,
            created_at: Utc::now(),
        });
        self.transactions.last().unwrap()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}
