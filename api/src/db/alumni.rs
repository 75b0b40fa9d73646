use chrono::Utc;
use sqlx::{types::Json, QueryBuilder, Sqlite, SqlitePool};

use super::new_id;
use crate::models::{
    alumni::{Alumni, AlumniFilter, AlumniPayload, Page, PLACEHOLDER_IMAGE},
    StringList,
};

fn list_or_empty(list: &Option<StringList>) -> Json<Vec<String>> {
    Json(list.clone().map(|l| l.into_vec()).unwrap_or_default())
}

/// Search key for the `*_folded` columns. SQLite's `lower()` only folds ASCII.
fn fold(value: Option<&str>) -> Option<String> {
    value.map(str::to_lowercase)
}

/// Insert as given. Missing required columns surface as the store's
/// constraint error. Without an image the placeholder is stored.
pub async fn insert(
    pool: &SqlitePool,
    payload: &AlumniPayload,
    image: Option<&str>,
) -> Result<Alumni, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Alumni>(
        "INSERT INTO alumni (id, name, email, image, contact, year_of_passing, cgpa, batch, \
            courses, degree, department, current_company, position, achievements, linkedin, \
            github, location, name_folded, location_folded, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, COALESCE(?, ''), ?, ?, ?) \
         RETURNING *",
    )
    .bind(new_id())
    .bind(payload.name.as_deref())
    .bind(payload.email.as_deref())
    .bind(image.unwrap_or(PLACEHOLDER_IMAGE))
    .bind(payload.contact.as_deref())
    .bind(payload.year_of_passing)
    .bind(payload.cgpa)
    .bind(payload.batch.as_deref())
    .bind(list_or_empty(&payload.courses))
    .bind(payload.degree.as_deref())
    .bind(payload.department.as_deref())
    .bind(payload.current_company.as_deref())
    .bind(payload.position.as_deref())
    .bind(list_or_empty(&payload.achievements))
    .bind(payload.linkedin.as_deref())
    .bind(payload.github.as_deref())
    .bind(payload.location.as_deref())
    .bind(fold(payload.name.as_deref()))
    .bind(fold(payload.location.as_deref()))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Alumni>, sqlx::Error> {
    sqlx::query_as::<_, Alumni>("SELECT * FROM alumni WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Patch supplied fields. `None` if no such record.
pub async fn update(
    pool: &SqlitePool,
    id: &str,
    payload: &AlumniPayload,
    image: Option<&str>,
) -> Result<Option<Alumni>, sqlx::Error> {
    let courses = payload.courses.clone().map(|l| Json(l.into_vec()));
    let achievements = payload.achievements.clone().map(|l| Json(l.into_vec()));

    sqlx::query_as::<_, Alumni>(
        "UPDATE alumni SET \
            name = COALESCE(?, name), \
            email = COALESCE(?, email), \
            image = COALESCE(?, image), \
            contact = COALESCE(?, contact), \
            year_of_passing = COALESCE(?, year_of_passing), \
            cgpa = COALESCE(?, cgpa), \
            batch = COALESCE(?, batch), \
            courses = COALESCE(?, courses), \
            degree = COALESCE(?, degree), \
            department = COALESCE(?, department), \
            current_company = COALESCE(?, current_company), \
            position = COALESCE(?, position), \
            achievements = COALESCE(?, achievements), \
            linkedin = COALESCE(?, linkedin), \
            github = COALESCE(?, github), \
            location = COALESCE(?, location), \
            name_folded = COALESCE(?, name_folded), \
            location_folded = COALESCE(?, location_folded), \
            updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(payload.name.as_deref())
    .bind(payload.email.as_deref())
    .bind(image)
    .bind(payload.contact.as_deref())
    .bind(payload.year_of_passing)
    .bind(payload.cgpa)
    .bind(payload.batch.as_deref())
    .bind(courses)
    .bind(payload.degree.as_deref())
    .bind(payload.department.as_deref())
    .bind(payload.current_company.as_deref())
    .bind(payload.position.as_deref())
    .bind(achievements)
    .bind(payload.linkedin.as_deref())
    .bind(payload.github.as_deref())
    .bind(payload.location.as_deref())
    .bind(fold(payload.name.as_deref()))
    .bind(fold(payload.location.as_deref()))
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete by id. Deleting nothing is not an error.
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM alumni WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &AlumniFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(name) = &filter.name {
        builder
            .push(" AND instr(name_folded, ")
            .push_bind(name.to_lowercase())
            .push(") > 0");
    }
    if let Some(location) = &filter.location {
        builder
            .push(" AND instr(location_folded, ")
            .push_bind(location.to_lowercase())
            .push(") > 0");
    }
    if let Some(batch) = &filter.batch {
        builder.push(" AND batch = ").push_bind(batch.clone());
    }
    if let Some(department) = &filter.department {
        builder.push(" AND department = ").push_bind(department.clone());
    }
    if let Some(year) = filter.year_of_passing {
        builder.push(" AND year_of_passing = ").push_bind(year);
    }
    if let Some(course) = &filter.course {
        builder
            .push(" AND EXISTS (SELECT 1 FROM json_each(alumni.courses) WHERE json_each.value = ")
            .push_bind(course.clone())
            .push(")");
    }
}

/// One page of the filtered set, batch descending then name ascending, plus
/// the size of the whole filtered set.
pub async fn list(
    pool: &SqlitePool,
    filter: &AlumniFilter,
    page: Page,
) -> Result<(Vec<Alumni>, i64), sqlx::Error> {
    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM alumni");
    push_filter(&mut count, filter);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut select = QueryBuilder::<Sqlite>::new("SELECT * FROM alumni");
    push_filter(&mut select, filter);
    select
        .push(" ORDER BY batch DESC, name ASC, rowid ASC LIMIT ")
        .push_bind(page.size)
        .push(" OFFSET ")
        .push_bind(page.offset());
    let alumni = select.build_query_as::<Alumni>().fetch_all(pool).await?;

    Ok((alumni, total))
}
