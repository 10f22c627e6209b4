//! Quotation engine service
//!
//! Orchestrates the path from a submitted service request to a Draft
//! quotation: dispatch to the right calculator, then freeze the result into
//! the aggregate. Persistence and request-status bookkeeping belong to the
//! surrounding application layer.

use chrono::NaiveDate;
use tracing::info;

use core_kernel::EmployeeId;
use domain_pricing::calculators::disbursement;
use domain_pricing::{
    calculate_price, PriceCalculationResult, PricingError, RateBook, ServiceRequest,
    ShippingAgencyRequest,
};

use crate::error::QuotationError;
use crate::quotation::Quotation;

/// Prices requests against a rate book and generates quotations
#[derive(Debug, Clone, Default)]
pub struct QuotationEngine {
    rates: RateBook,
}

impl QuotationEngine {
    /// Creates an engine over the given rate book
    pub fn new(rates: RateBook) -> Self {
        Self { rates }
    }

    /// The rate book in use
    pub fn rates(&self) -> &RateBook {
        &self.rates
    }

    /// Prices a request without creating a quotation
    pub fn price(&self, request: &ServiceRequest) -> Result<PriceCalculationResult, PricingError> {
        calculate_price(&request.payload, &self.rates)
    }

    /// Generates a Draft quotation from a submitted service request
    ///
    /// `sequence` is the per-day quote counter supplied by the persistence
    /// layer; `today` stamps the quote date and starts the validity window.
    pub fn quote(
        &self,
        request: &ServiceRequest,
        employee_id: Option<EmployeeId>,
        sequence: u64,
        today: NaiveDate,
    ) -> Result<Quotation, QuotationError> {
        info!(request = %request.request_code, service = %request.service_type(), "generating quotation");

        let calculation = calculate_price(&request.payload, &self.rates)?;
        let quotation = Quotation::generate(request, &calculation, employee_id, sequence, today)?;

        info!(
            quote_code = quotation.quote_code(),
            finals = %quotation.final_amount(),
            "quotation generated"
        );

        Ok(quotation)
    }

    /// Produces the itemized disbursement account for an agency port call
    ///
    /// This is the detailed per-call account for the agency desk, distinct
    /// from the quick estimate used in quotations.
    pub fn disbursement_account(
        &self,
        request: &ShippingAgencyRequest,
    ) -> Result<PriceCalculationResult, PricingError> {
        disbursement::calculate(request)
    }
}
