//! Company CRUD, spreadsheet import/export and the import template.

use crate::domain::activity::{ActivityAction, EntityType};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::company::{Company, CompanyUpdate, NewCompany};
use crate::domain::manager::Manager;
use crate::domain::types::{
    CompanyId, CompanyName, EmailAddress, Label, PhoneNumber, TypeConstraintError, WebUrl,
};
use crate::dto::imports::ImportReport;
use crate::forms::companies::{
    CompanyExportQueryForm, CompanyListQueryForm, CreateCompanyForm, UpdateCompanyForm,
};
use crate::repository::{
    ActivityWriter, CompanyListQuery, CompanyReader, CompanyWriter, ManagerWriter,
};
use crate::services::{
    ServiceError, ServiceResult, current_manager, ensure_role, hub_of, read_upload, record,
};
use crate::spreadsheet::companies::{
    CompanyColumn, CompanyRow, company_template as build_template, export_companies as build_export,
    parse_company_rows,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_companies<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CompanyListQueryForm,
) -> ServiceResult<Vec<Company>>
where
    R: CompanyReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let mut query = CompanyListQuery::new(hub_of(user)?);
    if let Some(owner_id) = form.owner_id()? {
        query = query.owner(owner_id);
    }
    Ok(repo.list_companies(query)?)
}

pub fn get_company<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Company>
where
    R: CompanyReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    repo.get_company_by_id(CompanyId::new(id)?, hub_of(user)?)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a company owned by the current user.
pub fn create_company<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateCompanyForm,
) -> ServiceResult<Company>
where
    R: CompanyWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let manager = current_manager(repo, user)?;
    let new_company = form.into_domain(manager.hub_id, manager.id)?;

    let company = repo.create_company(&new_company)?;
    record(repo, &manager, EntityType::Company, company.id, ActivityAction::Created);
    Ok(company)
}

pub fn update_company<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: UpdateCompanyForm,
) -> ServiceResult<Company>
where
    R: CompanyWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let id = CompanyId::new(id)?;
    let updates = CompanyUpdate::try_from(form)?;
    let manager = current_manager(repo, user)?;

    let company = repo.update_company(id, manager.hub_id, &updates)?;
    record(repo, &manager, EntityType::Company, company.id, ActivityAction::Updated);
    Ok(company)
}

pub fn delete_company<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: CompanyWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let id = CompanyId::new(id)?;
    let manager = current_manager(repo, user)?;

    repo.delete_company(id, manager.hub_id)?;
    record(repo, &manager, EntityType::Company, id, ActivityAction::Deleted);
    Ok(())
}

/// Imports every valid row as a new company owned by the importing user.
///
/// Rows are stored one by one; a failing row is reported and does not undo
/// the rows stored before it.
pub fn import_companies<R>(
    repo: &R,
    user: &AuthenticatedUser,
    file_name: &str,
    bytes: &[u8],
) -> ServiceResult<ImportReport>
where
    R: CompanyWriter + ManagerWriter + ActivityWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    let rows = read_upload(file_name, bytes)?;
    let parsed = parse_company_rows(&rows)?;
    let manager = current_manager(repo, user)?;

    let mut report = ImportReport::new(parsed.warnings);
    for row in parsed.records {
        let new_company = match company_from_row(&row, &manager) {
            Ok(company) => company,
            Err(err) => {
                report.failure(&row.full_name, err);
                continue;
            }
        };
        match repo.create_company(&new_company) {
            Ok(company) => {
                record(repo, &manager, EntityType::Company, company.id, ActivityAction::Imported);
                report.success();
            }
            Err(err) => {
                log::warn!("Failed to import company on row {}: {err}", row.row);
                report.failure(&row.full_name, ServiceError::from(err));
            }
        }
    }
    Ok(report)
}

fn company_from_row(
    row: &CompanyRow,
    manager: &Manager,
) -> Result<NewCompany, TypeConstraintError> {
    let company = NewCompany::new(
        manager.hub_id,
        manager.id,
        CompanyName::new(row.full_name.as_str())?,
        Some(Label::new(row.industry.as_str())?),
        Some(Label::new(row.status.as_str())?),
    )
    .with_contacts(
        row.email.as_deref().map(EmailAddress::new).transpose()?,
        row.phone.as_deref().map(PhoneNumber::new).transpose()?,
        row.website.as_deref().map(WebUrl::new).transpose()?,
    );
    Ok(company)
}

/// Builds the `.xlsx` export, optionally restricted to some ids and columns.
pub fn export_companies<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CompanyExportQueryForm,
) -> ServiceResult<Vec<u8>>
where
    R: CompanyReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let columns = CompanyColumn::select(form.columns().as_deref())?;
    let mut query = CompanyListQuery::new(hub_of(user)?);
    if let Some(ids) = form.ids()? {
        query = query.ids(ids);
    }

    let companies = repo.list_companies(query)?;
    Ok(build_export(&companies, &columns)?)
}

pub fn company_template(user: &AuthenticatedUser) -> ServiceResult<Vec<u8>> {
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    Ok(build_template()?)
}
