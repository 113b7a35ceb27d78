//! ActorEntity trait implementation for the Page domain type.
//!
//! Pages are keyed by their slug, so the store refuses two pages with the
//! same slug. All validation runs before any field is written.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use super::error::PageError;
use crate::framework::ActorEntity;
use crate::model::{is_url_safe, Block, Page, PageCreate, PageId, PageUpdate};

fn validate_title(title: &str) -> Result<(), PageError> {
    if title.trim().is_empty() {
        return Err(PageError::Validation("title is required".to_string()));
    }
    Ok(())
}

fn validate_slug(slug: &str) -> Result<(), PageError> {
    if slug.is_empty() {
        return Err(PageError::Validation("slug is required".to_string()));
    }
    if !is_url_safe(slug) {
        return Err(PageError::Validation(format!("slug `{}` is not URL-safe", slug)));
    }
    Ok(())
}

/// Block ids are unique across the whole tree and every number is finite.
fn validate_blocks(blocks: &[Block]) -> Result<(), PageError> {
    let mut seen = HashSet::new();
    let mut problem = None;
    for block in blocks {
        block.walk(&mut |b| {
            if problem.is_some() {
                return;
            }
            if !seen.insert(&b.id) {
                problem = Some(format!("block id `{}` is used more than once", b.id));
            } else if let Some((name, _)) = b.props.iter().find(|(_, v)| !v.is_finite()) {
                problem = Some(format!("prop `{}` of block `{}` is not a finite number", name, b.id));
            }
        });
    }
    problem.map_or(Ok(()), |msg| Err(PageError::Validation(msg)))
}

impl ActorEntity for Page {
    type Id = PageId;
    type Create = PageCreate;
    type Update = PageUpdate;
    type Error = PageError;

    fn from_create_params(id: PageId, params: PageCreate, now: DateTime<Utc>) -> Result<Self, PageError> {
        validate_title(&params.title)?;
        validate_slug(&params.slug)?;
        validate_blocks(&params.blocks)?;
        Ok(Self {
            id,
            title: params.title,
            slug: params.slug,
            status: params.status,
            blocks: params.blocks,
            created_at: now,
            updated_at: now,
        })
    }

    fn lookup_key(&self) -> Option<&str> {
        Some(&self.slug)
    }

    /// Applies the fields present in the update and bumps `updated_at`.
    fn on_update(&mut self, update: PageUpdate, now: DateTime<Utc>) -> Result<(), PageError> {
        if let Some(title) = &update.title {
            validate_title(title)?;
        }
        if let Some(slug) = &update.slug {
            validate_slug(slug)?;
        }
        if let Some(blocks) = &update.blocks {
            validate_blocks(blocks)?;
        }

        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(blocks) = update.blocks {
            self.blocks = blocks;
        }
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{props, BlockId, BlockType, PageStatus};
    use crate::template::instantiate;

    fn create(title: &str, slug: &str) -> PageCreate {
        PageCreate {
            title: title.to_string(),
            slug: slug.to_string(),
            status: PageStatus::Draft,
            blocks: vec![],
        }
    }

    #[test]
    fn test_create_validates_title_and_slug() {
        let now = Utc::now();
        assert!(Page::from_create_params(PageId(1), create("Home", "home"), now).is_ok());
        assert!(matches!(
            Page::from_create_params(PageId(1), create("  ", "home"), now),
            Err(PageError::Validation(_))
        ));
        assert!(matches!(
            Page::from_create_params(PageId(1), create("Home", "Home Page"), now),
            Err(PageError::Validation(_))
        ));
    }

    #[test]
    fn test_rejected_update_changes_nothing() {
        let created = Utc::now();
        let mut page = Page::from_create_params(PageId(1), create("Home", "home"), created).unwrap();
        let before = page.clone();

        let update = PageUpdate {
            title: Some("Welcome".to_string()),
            slug: Some("not valid".to_string()),
            ..Default::default()
        };
        assert!(page.on_update(update, Utc::now()).is_err());
        assert_eq!(page, before);
    }

    #[test]
    fn test_update_applies_present_fields() {
        let created = Utc::now();
        let mut page = Page::from_create_params(PageId(1), create("Home", "home"), created).unwrap();
        let later = created + chrono::Duration::seconds(5);

        let update = PageUpdate {
            status: Some(PageStatus::Published),
            ..Default::default()
        };
        page.on_update(update, later).unwrap();

        assert_eq!(page.status, PageStatus::Published);
        assert_eq!(page.title, "Home");
        assert_eq!(page.created_at, created);
        assert_eq!(page.updated_at, later);
    }

    fn block(id: &str, kind: BlockType) -> Block {
        instantiate(kind).into_block(BlockId::from(id))
    }

    #[test]
    fn test_repeated_block_ids_are_rejected() {
        let now = Utc::now();
        let mut params = create("Home", "home");
        params.blocks = vec![block("x", BlockType::Text), block("x", BlockType::Heading)];
        assert!(matches!(
            Page::from_create_params(PageId(1), params, now),
            Err(PageError::Validation(msg)) if msg.contains("`x`")
        ));

        // Nested repeats count too
        let mut section = block("s", BlockType::Section);
        section.children = Some(vec![block("h", BlockType::Heading)]);
        let mut page = Page::from_create_params(PageId(1), create("Home", "home"), now).unwrap();
        let before = page.clone();
        let update = PageUpdate {
            blocks: Some(vec![section, block("h", BlockType::Spacer)]),
            ..Default::default()
        };
        assert!(matches!(page.on_update(update, Utc::now()), Err(PageError::Validation(_))));
        assert_eq!(page, before);
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        let mut spacer = block("sp", BlockType::Spacer);
        spacer.props.extend(props([("height", f64::NAN)]));
        let mut params = create("Home", "home");
        params.blocks = vec![spacer];
        assert!(matches!(
            Page::from_create_params(PageId(1), params, Utc::now()),
            Err(PageError::Validation(msg)) if msg.contains("height")
        ));

        let mut divider = block("d", BlockType::Divider);
        divider.props.extend(props([("thickness", f64::INFINITY)]));
        let mut page = Page::from_create_params(PageId(1), create("Home", "home"), Utc::now()).unwrap();
        let update = PageUpdate {
            blocks: Some(vec![divider]),
            ..Default::default()
        };
        assert!(page.on_update(update, Utc::now()).is_err());
        assert!(page.blocks.is_empty());
    }
}
