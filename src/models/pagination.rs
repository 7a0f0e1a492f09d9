use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl PaginationQuery {
    pub fn validate(&mut self) {
        if self.page < 1 {
            self.page = 1;
        }
        if self.limit < 1 || self.limit > 100 {
            self.limit = 10;
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(current_page: i64, per_page: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            (total_items as f64 / per_page as f64).ceil() as i64
        };

        Self {
            current_page,
            per_page,
            total_items,
            total_pages,
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_query_values_are_clamped() {
        let mut query = PaginationQuery { page: 0, limit: 500 };
        query.validate();

        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn offset_skips_whole_pages() {
        let mut query = PaginationQuery { page: 3, limit: 10 };
        query.validate();

        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn total_pages_round_up() {
        let meta = PaginationMeta::new(1, 10, 31);
        assert_eq!(meta.total_pages, 4);
    }

    #[test]
    fn empty_collections_still_report_one_page() {
        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 1);
    }
}
