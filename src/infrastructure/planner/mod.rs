mod http_trip_planner;
mod mock_trip_planner;

pub use http_trip_planner::HttpTripPlanner;
pub use mock_trip_planner::MockTripPlanner;
