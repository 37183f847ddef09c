//! Deal CRUD, spreadsheet import/export and the import template.

use std::collections::HashMap;

use crate::domain::activity::{ActivityAction, EntityType};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::deal::{Deal, DealUpdate, NewDeal};
use crate::domain::manager::Manager;
use crate::domain::types::{
    Amount, CompanyId, ContactId, DealId, DealName, Label, ManagerId, RichText,
    TypeConstraintError,
};
use crate::dto::imports::ImportReport;
use crate::forms::deals::{CreateDealForm, DealListQueryForm, UpdateDealForm};
use crate::repository::{
    ActivityWriter, CompanyListQuery, CompanyReader, ContactReader, DealReader, DealWriter,
    ManagerReader, ManagerWriter,
};
use crate::services::{
    ServiceError, ServiceResult, current_manager, ensure_role, hub_of, read_upload, record,
};
use crate::spreadsheet::deals::{
    DealExportRow, DealRow, deal_template as build_template, export_deals as build_export,
    parse_deal_rows,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_deals<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: DealListQueryForm,
) -> ServiceResult<Vec<Deal>>
where
    R: DealReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let query = form.into_query(hub_of(user)?)?;
    Ok(repo.list_deals(query)?)
}

pub fn get_deal<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Deal>
where
    R: DealReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    repo.get_deal_by_id(DealId::new(id)?, hub_of(user)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_deal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateDealForm,
) -> ServiceResult<Deal>
where
    R: DealWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let manager = current_manager(repo, user)?;
    let new_deal = form.into_domain(manager.hub_id, manager.id)?;

    let deal = repo.create_deal(&new_deal)?;
    record(repo, &manager, EntityType::Deal, deal.id, ActivityAction::Created);
    Ok(deal)
}

pub fn update_deal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: UpdateDealForm,
) -> ServiceResult<Deal>
where
    R: DealWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let id = DealId::new(id)?;
    let updates = DealUpdate::try_from(form)?;
    let manager = current_manager(repo, user)?;

    let deal = repo.update_deal(id, manager.hub_id, &updates)?;
    record(repo, &manager, EntityType::Deal, deal.id, ActivityAction::Updated);
    Ok(deal)
}

pub fn delete_deal<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: DealWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let id = DealId::new(id)?;
    let manager = current_manager(repo, user)?;

    repo.delete_deal(id, manager.hub_id)?;
    record(repo, &manager, EntityType::Deal, id, ActivityAction::Deleted);
    Ok(())
}

/// Case-insensitive name lookup of the hub's companies and contacts.
struct Relations {
    companies: HashMap<String, CompanyId>,
    contacts: HashMap<String, ContactId>,
}

impl Relations {
    fn load<R>(repo: &R, manager: &Manager) -> ServiceResult<Self>
    where
        R: CompanyReader + ContactReader + ?Sized,
    {
        let companies = repo
            .list_companies(CompanyListQuery::new(manager.hub_id))?
            .into_iter()
            .map(|company| (company.full_name.to_lowercase(), company.id))
            .collect();
        let contacts = repo
            .list_contacts(manager.hub_id, None)?
            .into_iter()
            .map(|contact| (contact.full_name.to_lowercase(), contact.id))
            .collect();
        Ok(Self {
            companies,
            contacts,
        })
    }

    fn company(&self, row: &DealRow, report: &mut ImportReport) -> Option<CompanyId> {
        let name = row.company.as_deref()?;
        let found = self.companies.get(&name.to_lowercase()).copied();
        if found.is_none() {
            report.warn(format!("Row {}: Company '{name}' not found", row.row));
        }
        found
    }

    fn contact(&self, row: &DealRow, report: &mut ImportReport) -> Option<ContactId> {
        let name = row.contact.as_deref()?;
        let found = self.contacts.get(&name.to_lowercase()).copied();
        if found.is_none() {
            report.warn(format!("Row {}: Contact '{name}' not found", row.row));
        }
        found
    }
}

fn deal_from_row(
    row: DealRow,
    manager: &Manager,
    company_id: Option<CompanyId>,
    contact_id: Option<ContactId>,
) -> Result<NewDeal, TypeConstraintError> {
    let mut deal = NewDeal::new(manager.hub_id, manager.id, DealName::new(row.deal_name)?)
        .stage(row.stage)
        .amount(Amount::new(row.amount)?);
    deal.company_id = company_id;
    deal.contact_id = contact_id;
    deal.activity = row.activity;
    deal.tags = row.tags;
    deal.close_date = row.close_date;
    deal.priority = row.priority.map(Label::new).transpose()?;
    deal.notes = row.notes.map(RichText::new).transpose()?;
    Ok(deal)
}

/// Imports every valid row as a deal owned by the importing user. Company
/// and contact cells are matched by name; unknown names are reported as
/// warnings and left empty.
pub fn import_deals<R>(
    repo: &R,
    user: &AuthenticatedUser,
    file_name: &str,
    bytes: &[u8],
) -> ServiceResult<ImportReport>
where
    R: DealWriter + CompanyReader + ContactReader + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    let rows = read_upload(file_name, bytes)?;
    let parsed = parse_deal_rows(&rows)?;
    let manager = current_manager(repo, user)?;
    let relations = Relations::load(repo, &manager)?;

    let mut report = ImportReport::new(parsed.warnings);
    for row in parsed.records {
        let name = row.deal_name.clone();
        let line = row.row;
        let company_id = relations.company(&row, &mut report);
        let contact_id = relations.contact(&row, &mut report);

        let new_deal = match deal_from_row(row, &manager, company_id, contact_id) {
            Ok(deal) => deal,
            Err(err) => {
                report.failure(&name, err);
                continue;
            }
        };
        match repo.create_deal(&new_deal) {
            Ok(deal) => {
                record(repo, &manager, EntityType::Deal, deal.id, ActivityAction::Imported);
                report.success();
            }
            Err(err) => {
                log::warn!("Failed to import deal on row {line}: {err}");
                report.failure(&name, ServiceError::from(err));
            }
        }
    }
    Ok(report)
}

/// Builds the `.xlsx` export of the deals matching the listing filters.
pub fn export_deals<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: DealListQueryForm,
) -> ServiceResult<Vec<u8>>
where
    R: DealReader + CompanyReader + ContactReader + ManagerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let hub_id = hub_of(user)?;
    let deals = repo.list_deals(form.into_query(hub_id)?)?;

    let companies: HashMap<CompanyId, String> = repo
        .list_companies(CompanyListQuery::new(hub_id))?
        .into_iter()
        .map(|company| (company.id, company.full_name.into_inner()))
        .collect();
    let contacts: HashMap<ContactId, String> = repo
        .list_contacts(hub_id, None)?
        .into_iter()
        .map(|contact| (contact.id, contact.full_name.into_inner()))
        .collect();
    let owners: HashMap<ManagerId, String> = repo
        .list_managers(hub_id)?
        .into_iter()
        .map(|manager| (manager.id, manager.name.into_inner()))
        .collect();

    let rows: Vec<DealExportRow<'_>> = deals
        .iter()
        .map(|deal| DealExportRow {
            deal,
            company: deal
                .company_id
                .and_then(|id| companies.get(&id))
                .map(String::as_str),
            contact: deal
                .contact_id
                .and_then(|id| contacts.get(&id))
                .map(String::as_str),
            owner: owners.get(&deal.owner_id).map(String::as_str),
        })
        .collect();
    Ok(build_export(&rows)?)
}

pub fn deal_template(user: &AuthenticatedUser) -> ServiceResult<Vec<u8>> {
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    Ok(build_template()?)
}
