mod advisor_flow;
